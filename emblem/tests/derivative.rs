use emblem::prelude::*;

fn xy() -> (Symbol<f64>, Symbol<f64>) {
    (Symbol::new("x"), Symbol::new("y"))
}

fn slope(e: &Expression<f64>, x: &Symbol<f64>, v: f64) -> f64 {
    e.derivative(x)
        .evaluate(&ValueMap::from([(x.clone(), v)]))
        .unwrap()
}

fn assert_close(got: f64, expected: f64) {
    assert!(
        (got - expected).abs() < 1e-12,
        "got {got}, expected {expected}"
    );
}

#[test]
fn base_cases() {
    let (x, y) = xy();
    assert_eq!(Expression::from(&x).derivative(&x), Expression::constant(1.0));
    assert_eq!(Expression::from(&y).derivative(&x), Expression::constant(0.0));
    assert_eq!(Expression::constant(5.0).derivative(&x), Expression::constant(0.0));
    assert_eq!(Expression::<f64>::new().derivative(&x), Expression::constant(0.0));
}

#[test]
fn product_rule_without_simplification() {
    let (x, _) = xy();
    let e = &x * &x;
    let d = e.derivative(&x);
    assert_eq!(d.to_string(), "(1 * x) + (x * 1)");
    assert_close(slope(&e, &x, 3.0), 6.0);
    assert_eq!(e.to_string(), "x * x");
}

#[test]
fn quotient_rule_squares_denominator() {
    let (x, y) = xy();
    let e = &x / &y;
    let d = e.derivative(&x);
    assert_eq!(d.to_string(), "((1 * y) - (x * 0)) / (y^2)");
    let b = ValueMap::from([(x.clone(), 2.0), (y.clone(), 4.0)]);
    assert_eq!(d.evaluate(&b), Ok(0.25));
    assert_eq!(e.derivative(&y).evaluate(&b), Ok(-0.125));
}

#[test]
fn sum_and_difference_distribute() {
    let (x, y) = xy();
    let e = &x + &y - &x * &y;
    let b = ValueMap::from([(x.clone(), 2.0), (y.clone(), 3.0)]);
    assert_eq!(e.derivative(&x).evaluate(&b), Ok(-2.0));
    assert_eq!(e.derivative(&y).evaluate(&b), Ok(-1.0));
}

#[test]
fn chain_rule_for_unary_functions() {
    let (x, _) = xy();
    let v = 0.6_f64;
    let cases: [(Expression<f64>, f64); 14] = [
        (identity(&x), 1.0),
        (-&x, -1.0),
        (sin(&x), v.cos()),
        (cos(&x), -v.sin()),
        (tan(&x), 1.0 / (v.cos() * v.cos())),
        (csc(&x), -1.0 / (v.sin() * v.tan())),
        (sec(&x), v.tan() / v.cos()),
        (cot(&x), -1.0 / (v.sin() * v.sin())),
        (abs(&x), 1.0),
        (abs(-&x), 1.0),
        (exp(&x), v.exp()),
        (log(&x), 1.0 / v),
        (log10(&x), 1.0 / (v * std::f64::consts::LN_10)),
        (sqrt(&x), 0.5 / v.sqrt()),
    ];
    for (e, expected) in cases {
        assert_close(slope(&e, &x, v), expected);
    }

    let nested = sin(2.0 * &x);
    assert_close(slope(&nested, &x, v), 2.0 * (2.0 * v).cos());
}

#[test]
fn power_rule_with_constant_exponent() {
    let (x, _) = xy();
    let e = pow(&x, 3.0);
    assert_eq!(e.derivative(&x).to_string(), "3 * (x^(3 - 1)) * 1");
    assert_close(slope(&e, &x, 2.0), 12.0);
}

#[test]
fn power_rule_with_variable_exponent() {
    let (x, _) = xy();
    assert_close(slope(&pow(2.0, &x), &x, 1.5), 2f64.powf(1.5) * 2f64.ln());
    assert_close(slope(&pow(&x, &x), &x, 2.0), 4.0 * (2f64.ln() + 1.0));
}

#[test]
fn unrelated_symbol_differentiates_to_zero() {
    let (x, y) = xy();
    let e = sin(&y) * exp(&y);
    let d = e.derivative(&x);
    let b = ValueMap::from([(y.clone(), 1.3)]);
    assert_eq!(d.evaluate(&b), Ok(0.0));
}

#[test]
fn deep_chains_differentiate_without_recursion() {
    let (x, _) = xy();

    let mut negated = Expression::from(&x);
    for _ in 0..200_000 {
        negated = -negated;
    }
    let d = negated.derivative(&x);
    assert_eq!(d.len(), 200_001);
    assert_eq!(d.evaluate(&ValueMap::new()), Ok(1.0));

    let mut sum = Expression::from(&x);
    for _ in 0..20_000 {
        sum += &x;
    }
    let d = sum.derivative(&x);
    assert_eq!(d.len(), sum.len());
    assert_eq!(d.evaluate(&ValueMap::new()), Ok(20_001.0));
}
