use emblem::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let x = Symbol::<f64>::new("x");
    let y = Symbol::<f64>::new("y");

    // sin(x * y) + (2 * y)
    let mut expr = sin(&x * &y) + 2.0 * &y;
    expr.pretty_print()?;

    let values = ValueMap::from([(x.clone(), 0.5), (y.clone(), 3.0)]);
    println!("  at x = 0.5, y = 3: {}", expr.evaluate(&values)?);

    let replaced = expr.substitute(&y, &x + 1.0);
    println!("y := x + 1 ({replaced} occurrence(s)): {expr}");
    println!("  at x = 0.5: {}", expr.evaluate(&[(x.clone(), 0.5)])?);

    let slope = expr.derivative(&x);
    print!("d/dx: ");
    slope.pretty_print()?;

    if let Err(err) = slope.evaluate(&[(y.clone(), 1.0)]) {
        println!("  {err}");
    }

    Ok(())
}
