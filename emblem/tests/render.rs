use emblem::prelude::*;
use termcolor::Buffer;

fn abc() -> (Symbol<f64>, Symbol<f64>, Symbol<f64>) {
    (Symbol::new("a"), Symbol::new("b"), Symbol::new("c"))
}

#[test]
fn leaves() {
    let (a, _, _) = abc();
    assert_eq!(Expression::from(&a).to_string(), "a");
    assert_eq!(Expression::constant(2.5).to_string(), "2.5");
    assert_eq!(Expression::constant(-3.0).to_string(), "-3");
    assert_eq!(Expression::<f64>::new().to_string(), "");
}

#[test]
fn binary_operators() {
    let (a, b, _) = abc();
    assert_eq!((&a + &b).to_string(), "a + b");
    assert_eq!((&a - &b).to_string(), "a - b");
    assert_eq!((&a * &b).to_string(), "a * b");
    assert_eq!((&a / &b).to_string(), "a / b");
    assert_eq!(pow(&a, &b).to_string(), "a^b");
}

#[test]
fn mixed_operators_are_parenthesised() {
    let (a, b, c) = abc();
    assert_eq!(((&a + &b) * &c).to_string(), "(a + b) * c");
    assert_eq!((&a + &b * &c).to_string(), "a + (b * c)");
    assert_eq!((&a * &b + &c).to_string(), "(a * b) + c");
    assert_eq!(pow(&a + &b, 2.0).to_string(), "(a + b)^2");
}

#[test]
fn same_operator_chains() {
    let (a, b, c) = abc();
    assert_eq!((&a + &b + &c).to_string(), "a + b + c");
    assert_eq!((&a + (&b + &c)).to_string(), "a + b + c");
    assert_eq!((&a * (&b * &c)).to_string(), "a * b * c");
    assert_eq!((&a - &b - &c).to_string(), "a - b - c");
    assert_eq!((&a - (&b - &c)).to_string(), "a - (b - c)");
    assert_eq!((&a / &b / &c).to_string(), "a / b / c");
    assert_eq!((&a / (&b / &c)).to_string(), "a / (b / c)");
    assert_eq!(pow(&a, pow(&b, &c)).to_string(), "a^(b^c)");
}

#[test]
fn unary_operators() {
    let (a, b, _) = abc();
    let cases = [
        (identity(&a), "a"),
        (-&a, "-a"),
        (sin(&a), "sin(a)"),
        (cos(&a), "cos(a)"),
        (tan(&a), "tan(a)"),
        (csc(&a), "csc(a)"),
        (sec(&a), "sec(a)"),
        (cot(&a), "cot(a)"),
        (abs(&a), "|a|"),
        (exp(&a), "e^(a)"),
        (log(&a), "ln(a)"),
        (log10(&a), "log10(a)"),
        (sqrt(&a), "(a)^(1/2)"),
        (sin(&a + &b), "sin(a + b)"),
        (-(&a + &b), "-(a + b)"),
        (identity(&a * &b), "(a * b)"),
        (-(-&a), "--a"),
        (&a * -&b, "a * -b"),
    ];
    for (e, expected) in cases {
        assert_eq!(e.to_string(), expected);
    }
}

#[test]
fn signed_power_bases() {
    let (a, _, _) = abc();
    assert_eq!(pow(-&a, 2.0).to_string(), "(-a)^2");
    assert_eq!(pow(-2.0, &a).to_string(), "(-2)^a");
    assert_eq!(pow(&a, -1.0).to_string(), "a^(-1)");
    assert_eq!(pow(sin(&a), 2.0).to_string(), "sin(a)^2");
}

#[test]
fn rendering_is_deterministic() {
    let (a, b, c) = abc();
    let e = sin(((&a * &b) + (&c - &a) / 5.0) + &c);
    let first = e.to_string();
    assert_eq!(first, "sin((a * b) + ((c - a) / 5) + c)");
    assert_eq!(e.to_string(), first);
    assert_eq!(e.clone().to_string(), first);
    assert_eq!(e.pretty_string(), first);
    assert_eq!(e.pretty_doc().pretty(4).to_string(), first);
}

#[test]
fn colored_rendering() {
    let (a, b, _) = abc();
    let e = sin(&a) + &b * 2.0;

    let mut plain = Buffer::no_color();
    e.pretty_render_to(80, &mut plain).unwrap();
    assert_eq!(String::from_utf8(plain.into_inner()).unwrap(), e.to_string());

    let mut ansi = Buffer::ansi();
    e.pretty_render_to(80, &mut ansi).unwrap();
    let colored = String::from_utf8(ansi.into_inner()).unwrap();
    assert!(colored.contains("\u{1b}["));
    assert!(colored.contains("sin("));
}

#[test]
fn deep_negation_chain_renders_without_recursion() {
    let (a, _, _) = abc();
    let mut e = Expression::from(&a);
    for _ in 0..200_000 {
        e = -e;
    }

    let text = e.to_string();
    assert_eq!(text.len(), 200_001);
    assert!(text.starts_with("--"));
    assert!(text.ends_with("-a"));

    let mut ansi = Buffer::ansi();
    e.pretty_render_to(80, &mut ansi).unwrap();
    assert!(!ansi.into_inner().is_empty());

    let doc = e.pretty_doc();
    drop(doc);
}

#[test]
fn long_compound_sum_renders_flat() {
    let (a, _, _) = abc();
    let mut e = Expression::from(&a);
    for _ in 0..20_000 {
        e += &a;
    }

    let text = e.pretty_string();
    assert_eq!(text.matches(" + ").count(), 20_000);
    assert!(!text.contains('('));
    assert_eq!(text, e.to_string());
}
