use rawnet::{
    arithmetic_grid, train_epoch, ActivationFunction, InitStrategy, Network, NetworkConfig,
    Operation,
};

// A linear hidden layer can only fit a plane through the products; the
// sigmoid run shows how far one squashed layer gets on the same grid.
fn main() -> rawnet::Result<()> {
    let samples = arithmetic_grid(Operation::Multiplication, 10);

    for (activation, learning_rate) in [
        (ActivationFunction::Identity, 1e-5),
        (ActivationFunction::Sigmoid, 1e-3),
    ] {
        let config = NetworkConfig::new(2, 8, 1, learning_rate)
            .with_init(InitStrategy::Uniform { bound: 0.5, seed: Some(11) })
            .with_activation(activation);
        let mut network = Network::new(&config)?;

        let mut loss = f64::NAN;
        for _ in 0..500 {
            loss = train_epoch(&mut network, &samples)?.train_loss;
        }
        println!("{activation:?}: final loss = {loss:.4}");
        for (a, b) in [(2.0, 3.0), (5.0, 5.0), (9.0, 8.0)] {
            println!("  {a} * {b} = {:.4}", network.evaluate(&[a, b])?[0]);
        }
    }
    Ok(())
}
