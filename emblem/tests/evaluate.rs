use std::collections::{BTreeMap, HashMap};

use emblem::prelude::*;

fn xyz() -> (Symbol<f64>, Symbol<f64>, Symbol<f64>) {
    (Symbol::new("x"), Symbol::new("y"), Symbol::new("z"))
}

#[test]
fn symbol_and_constant_leaves() {
    let (x, _, _) = xyz();
    let binding = ValueMap::from([(x.clone(), 2.5)]);
    assert_eq!(Expression::from(&x).evaluate(&binding), Ok(2.5));
    assert_eq!(Expression::constant(-4.0).evaluate(&binding), Ok(-4.0));
    assert_eq!((-&x).evaluate(&binding), Ok(-2.5));
}

#[test]
fn binary_arithmetic() {
    let (x, y, _) = xyz();
    let binding = ValueMap::from([(x.clone(), 7.0), (y.clone(), 2.0)]);
    assert_eq!((&x + &y).evaluate(&binding), Ok(9.0));
    assert_eq!((&x - &y).evaluate(&binding), Ok(5.0));
    assert_eq!((&x * &y).evaluate(&binding), Ok(14.0));
    assert_eq!((&x / &y).evaluate(&binding), Ok(3.5));
    assert_eq!(pow(&x, &y).evaluate(&binding), Ok(49.0));
}

#[test]
fn operand_order_is_preserved() {
    let (x, y, _) = xyz();
    let binding = ValueMap::from([(x.clone(), 1.0), (y.clone(), 4.0)]);
    assert_eq!((&y - &x).evaluate(&binding), Ok(3.0));
    assert_eq!((&x - &y).evaluate(&binding), Ok(-3.0));
    assert_eq!((1.0 / &y).evaluate(&binding), Ok(0.25));
    assert_eq!((&y / 8.0).evaluate(&binding), Ok(0.5));
    assert_eq!((10.0 - (&y - &x)).evaluate(&binding), Ok(7.0));
}

#[test]
fn unary_functions() {
    let (x, _, _) = xyz();
    let v = 0.7_f64;
    let binding = ValueMap::from([(x.clone(), v)]);
    let cases: [(Expression<f64>, f64); 13] = [
        (identity(&x), v),
        (-&x, -v),
        (sin(&x), v.sin()),
        (cos(&x), v.cos()),
        (tan(&x), v.tan()),
        (csc(&x), 1.0 / v.sin()),
        (sec(&x), 1.0 / v.cos()),
        (cot(&x), 1.0 / v.tan()),
        (abs(-&x), v),
        (exp(&x), v.exp()),
        (log(&x), v.ln()),
        (log10(&x), v.log10()),
        (sqrt(&x), v.sqrt()),
    ];
    for (expr, expected) in cases {
        let got = expr.evaluate(&binding).unwrap();
        assert!((got - expected).abs() < 1e-12, "{expr}: {got} != {expected}");
    }
}

#[test]
fn composite_formula() {
    let (x, y, z) = xyz();
    let e = sin(((&x * &y) + (&z - &x) / 5.0) + &z);
    let binding = ValueMap::from([(x.clone(), 4.0), (y.clone(), 3.0), (z.clone(), 2.0)]);
    let (xv, yv, zv) = (4.0_f64, 3.0_f64, 2.0_f64);
    let expected = (((xv * yv) + (zv - xv) / 5.0) + zv).sin();
    assert!((e.evaluate(&binding).unwrap() - expected).abs() < 1e-12);
}

#[test]
fn empty_expression_is_zero() {
    let e: Expression<f64> = Expression::new();
    assert_eq!(e.evaluate(&ValueMap::new()), Ok(0.0));
    assert_eq!(Expression::<f32>::default().evaluate(&ValueMap::new()), Ok(0.0));
}

#[test]
fn unbound_symbol_is_reported() {
    let (x, y, _) = xyz();
    let e = &x + &y;

    let err = e.evaluate(&ValueMap::new()).unwrap_err();
    assert_eq!(err, Error::UnboundSymbol { name: "x".into() });
    assert!(err.to_string().contains("`x`"));

    let partial = ValueMap::from([(x.clone(), 1.0)]);
    let err = e.evaluate(&partial).unwrap_err();
    assert!(err.is_unbound_symbol());
    assert_eq!(err, Error::UnboundSymbol { name: "y".into() });

    let complete = ValueMap::from([(x.clone(), 1.0), (y.clone(), 2.0)]);
    assert_eq!(e.evaluate(&complete), Ok(3.0));
}

#[test]
fn binding_kinds() {
    let (x, y, _) = xyz();
    let e = &x * 10.0 + &y;

    let by_name: HashMap<&str, f64> = HashMap::from([("x", 1.0), ("y", 2.0)]);
    assert_eq!(e.evaluate(&by_name), Ok(12.0));

    let by_string: BTreeMap<String, f64> =
        BTreeMap::from([("x".to_owned(), 3.0), ("y".to_owned(), 4.0)]);
    assert_eq!(e.evaluate(&by_string), Ok(34.0));

    let by_symbol: HashMap<Symbol<f64>, f64> = HashMap::from([(x.clone(), 5.0), (y.clone(), 6.0)]);
    assert_eq!(e.evaluate(&by_symbol), Ok(56.0));

    let pairs = [(x.clone(), 7.0), (y.clone(), 8.0)];
    assert_eq!(e.evaluate(&pairs), Ok(78.0));
    assert_eq!(e.evaluate(&pairs[..]), Ok(78.0));
    assert_eq!(e.evaluate(&pairs.to_vec()), Ok(78.0));
}

#[test]
fn single_precision() {
    let x = Symbol::<f32>::new("x");
    let e = 2.0_f32 * &x + 1.0_f32;
    let binding = ValueMap::from([(x.clone(), 3.0_f32)]);
    assert_eq!(e.evaluate(&binding), Ok(7.0_f32));
}

#[test]
fn expressions_cross_threads() {
    let x = Symbol::<f64>::new("x");
    let e = sin(&x) * 2.0;
    let binding = ValueMap::from([(x.clone(), 0.0)]);
    let handle = std::thread::spawn(move || e.evaluate(&binding));
    assert_eq!(handle.join().unwrap(), Ok(0.0));
}
