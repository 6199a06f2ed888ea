use shallow_nn::{parse_sample, Network, NetworkConfig};

fn main() {
    tracing_subscriber::fmt().compact().init();

    let config = NetworkConfig {
        epochs: 10_000,
        ..NetworkConfig::default()
    };
    let mut network = Network::new(config).expect("the default XOR configuration is valid");
    network.train();

    // Extra arguments of the form "x,y" are predicted instead of the truth table.
    let samples: Vec<String> = std::env::args().skip(1).collect();
    if samples.is_empty() {
        for sample in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]] {
            let output = network
                .predict(&sample)
                .expect("sample matches the input width");
            println!("Input: {:?} -> Output: {:.4}", sample, output[0]);
        }
        return;
    }

    for raw in &samples {
        match parse_sample(raw).and_then(|sample| network.predict(&sample)) {
            Ok(output) => println!("Input: {} -> Output: {:.4}", raw, output[0]),
            Err(err) => eprintln!("{}: {}", raw, err),
        }
    }
}
