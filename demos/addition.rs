use rawnet::{arithmetic_grid, train_epoch, InitStrategy, Network, NetworkConfig, Operation};

fn main() -> rawnet::Result<()> {
    let config = NetworkConfig::new(2, 2, 1, 1e-3)
        .with_init(InitStrategy::Uniform { bound: 0.5, seed: Some(7) });
    let mut network = Network::new(&config)?;
    let samples = arithmetic_grid(Operation::Addition, 10);

    let epochs = 200;
    for epoch in 0..epochs {
        let stats = train_epoch(&mut network, &samples)?;
        if epoch % 20 == 0 {
            println!("Epoch {epoch}: loss = {:.6}", stats.train_loss);
        }
    }

    for (a, b) in [(2.0, 3.0), (7.0, 9.0), (15.0, 12.0)] {
        println!("{a} + {b} = {:.4}", network.evaluate(&[a, b])?[0]);
    }
    println!("weights_ih: {:?}", network.weights_ih().data);
    println!("weights_ho: {:?}", network.weights_ho().data);
    Ok(())
}
