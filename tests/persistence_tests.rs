use rawnet::{
    arithmetic_grid, train_epoch, ActivationFunction, DivergencePolicy, InitStrategy, Network,
    NetworkConfig, NetworkError, Operation,
};

fn trained_net() -> Network {
    let config = NetworkConfig::new(2, 3, 1, 1e-3)
        .with_init(InitStrategy::Uniform { bound: 0.5, seed: Some(17) });
    let mut net = Network::new(&config).unwrap();
    let samples = arithmetic_grid(Operation::Addition, 10);
    for _ in 0..5 {
        train_epoch(&mut net, &samples).unwrap();
    }
    net
}

fn state_bits(net: &Network) -> Vec<u64> {
    net.input_layer()
        .iter()
        .chain(net.hidden_layer())
        .chain(net.output_layer())
        .chain(net.weights_ih().data.iter().flatten())
        .chain(net.weights_ho().data.iter().flatten())
        .chain(std::iter::once(&net.learning_rate()))
        .map(|x| x.to_bits())
        .collect()
}

#[test]
fn export_then_load_reproduces_the_network() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("addition.json");
    let net = trained_net();

    net.export_json(&path).unwrap();
    let loaded = Network::load_json(&path).unwrap();

    assert_eq!(loaded.input_size(), 2);
    assert_eq!(loaded.hidden_size(), 3);
    assert_eq!(loaded.output_size(), 1);
    assert_eq!(state_bits(&loaded), state_bits(&net));
}

#[test]
fn export_then_load_is_bit_exact_across_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seeded.json");
    let samples = arithmetic_grid(Operation::Addition, 10);
    for seed in 0..100 {
        let config = NetworkConfig::new(2, 3, 1, 1e-3)
            .with_init(InitStrategy::Uniform { bound: 0.5, seed: Some(seed) });
        let mut net = Network::new(&config).unwrap();
        for _ in 0..3 {
            train_epoch(&mut net, &samples).unwrap();
        }
        net.export_json(&path).unwrap();
        let loaded = Network::load_json(&path).unwrap();
        assert_eq!(state_bits(&loaded), state_bits(&net), "seed {seed}");
    }
}

#[test]
fn import_replaces_state_but_keeps_runtime_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.json");
    let source = trained_net();
    source.export_json(&path).unwrap();

    let config = NetworkConfig::new(2, 3, 1, 0.5)
        .with_init(InitStrategy::Constant { value: 1.0 })
        .with_activation(ActivationFunction::Sigmoid)
        .with_divergence(DivergencePolicy::Abort);
    let mut net = Network::new(&config).unwrap();
    net.import_json(&path).unwrap();

    assert_eq!(net.weights_ih(), source.weights_ih());
    assert_eq!(net.weights_ho(), source.weights_ho());
    assert_eq!(net.learning_rate(), source.learning_rate());
    assert_eq!(net.activation(), ActivationFunction::Sigmoid);
    assert_eq!(net.divergence_policy(), DivergencePolicy::Abort);
}

#[test]
fn import_rejects_other_dimensions_and_keeps_live_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.json");
    trained_net().export_json(&path).unwrap();

    let mut net = Network::build(2, 2, 1, 0.1, &InitStrategy::Constant { value: 1.0 }).unwrap();
    let before = net.clone();
    assert!(matches!(
        net.import_json(&path),
        Err(NetworkError::ShapeMismatch { expected: 2, actual: 3, .. })
    ));
    assert_eq!(net, before);
}

#[test]
fn import_if_present_skips_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut net = Network::build(2, 3, 1, 0.1, &InitStrategy::Constant { value: 1.0 }).unwrap();
    let before = net.clone();
    assert!(!net.import_if_present(dir.path().join("absent.json")).unwrap());
    assert_eq!(net, before);
}

#[test]
fn import_if_present_reads_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.json");
    let source = trained_net();
    source.export_json(&path).unwrap();

    let mut net = Network::build(2, 3, 1, 0.1, &InitStrategy::Constant { value: 1.0 }).unwrap();
    assert!(net.import_if_present(&path).unwrap());
    assert_eq!(net.weights_ih(), source.weights_ih());
    assert_eq!(net.weights_ho(), source.weights_ho());
}

#[test]
fn import_if_present_fails_on_a_corrupt_file_and_leaves_it_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.json");
    let corrupt = "{\"input_layer\": [0.0, 0.0], \"hidden";
    std::fs::write(&path, corrupt).unwrap();

    let mut net = Network::build(2, 3, 1, 0.1, &InitStrategy::Constant { value: 1.0 }).unwrap();
    let before = net.clone();
    assert!(matches!(net.import_if_present(&path), Err(NetworkError::Decode(_))));
    assert_eq!(net, before);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), corrupt);

    // a document for another shape is refused the same way
    trained_net().export_json(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    let mut other = Network::build(2, 2, 1, 0.1, &InitStrategy::Constant { value: 1.0 }).unwrap();
    assert!(matches!(other.import_if_present(&path), Err(NetworkError::ShapeMismatch { .. })));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut net = Network::build(2, 2, 1, 0.1, &InitStrategy::default()).unwrap();
    match net.import_json(dir.path().join("absent.json")) {
        Err(NetworkError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected i/o error, got {other:?}"),
    }
}

#[test]
fn malformed_document_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");

    std::fs::write(&path, "{\"input_layer\": [0.0, 0.0], \"hidden_layer\": ").unwrap();
    assert!(matches!(Network::load_json(&path), Err(NetworkError::Decode(_))));

    std::fs::write(&path, "{\"input_layer\": [0.0]}").unwrap();
    assert!(matches!(Network::load_json(&path), Err(NetworkError::Decode(_))));

    std::fs::write(
        &path,
        r#"{"input_layer": [0.0], "hidden_layer": [0.0], "output_layer": [0.0],
            "weights_ih": [[1.0]], "weights_ho": [[1.0], [2.0, 3.0]], "learning_rate": 0.1}"#,
    )
    .unwrap();
    assert!(matches!(Network::load_json(&path), Err(NetworkError::Decode(_))));
}

#[test]
fn export_to_unwritable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let net = trained_net();
    let path = dir.path().join("no-such-dir").join("weights.json");
    assert!(matches!(net.export_json(&path), Err(NetworkError::Io(_))));
}

#[test]
fn document_written_by_hand_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hand.json");
    std::fs::write(
        &path,
        r#"{
            "input_layer": [0, 0],
            "hidden_layer": [0, 0],
            "output_layer": [0],
            "weights_ih": [[1, 0], [0, 1]],
            "weights_ho": [[1], [1]],
            "learning_rate": 2e-14
        }"#,
    )
    .unwrap();
    let mut net = Network::load_json(&path).unwrap();
    assert_eq!(net.evaluate(&[4.0, 6.0]).unwrap(), &[10.0]);
    assert_eq!(net.learning_rate(), 2e-14);
}
