use emblem::ops::{BinaryOp, UnaryOp};
use strum::IntoEnumIterator;

#[test]
fn descriptors_belong_to_their_handle() {
    for op in UnaryOp::iter() {
        assert_eq!(op.descriptor().op, op);
        assert_eq!(UnaryOp::from_name(op.name()), Some(op));
    }
    for op in BinaryOp::iter() {
        assert_eq!(op.descriptor().op, op);
        assert_eq!(BinaryOp::from_name(op.name()), Some(op));
    }
    assert_eq!(UnaryOp::from_name("cosh"), None);
}

#[test]
fn display_strings() {
    let sqrt = UnaryOp::Sqrt.descriptor();
    assert_eq!((sqrt.open, sqrt.close), ("(", ")^(1/2)"));
    let abs = UnaryOp::Abs.descriptor();
    assert_eq!((abs.open, abs.close), ("|", "|"));
    assert_eq!(UnaryOp::Exp.descriptor().open, "e^(");
    assert!(!UnaryOp::Negate.descriptor().encloses);
    assert!(UnaryOp::Sin.descriptor().encloses);

    let infix: Vec<_> = BinaryOp::iter().map(|op| op.descriptor().infix).collect();
    assert_eq!(infix, [" + ", " - ", " * ", " / ", "^"]);
    assert_eq!(UnaryOp::Ln.to_string(), "ln");
}

#[test]
fn associativity() {
    assert!(BinaryOp::Add.is_associative());
    assert!(BinaryOp::Mul.is_associative());
    assert!(!BinaryOp::Sub.is_associative());
    assert!(!BinaryOp::Div.is_associative());
    assert!(!BinaryOp::Pow.is_associative());
}

#[test]
fn application() {
    assert_eq!(BinaryOp::Sub.apply(5.0, 3.0), 2.0);
    assert_eq!(BinaryOp::Div.apply(1.0_f32, 4.0), 0.25);
    assert_eq!(BinaryOp::Pow.apply(2.0, 10.0), 1024.0);
    assert_eq!(UnaryOp::Negate.apply(2.0), -2.0);
    assert_eq!(UnaryOp::Identity.apply(2.0), 2.0);
    assert_eq!(UnaryOp::Abs.apply(-2.0), 2.0);
    assert_eq!(UnaryOp::Sec.apply(0.0), 1.0);
    assert_eq!(UnaryOp::Sqrt.apply(9.0), 3.0);
    assert!(UnaryOp::Ln.apply(-1.0_f64).is_nan());
}
