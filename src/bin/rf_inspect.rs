//! Model file inspector.
//!
//! Prints the trailer and per-tree node counts of a serialized forest, and
//! optionally classifies one sample.
//!
//! Usage:
//!   cargo run --bin rf_inspect -- MODEL_PATH [feature ...]

use std::process::ExitCode;

use rforest::RandomForestModel;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: rf_inspect MODEL_PATH [feature ...]");
        return ExitCode::FAILURE;
    };

    let features: Result<Vec<f64>, _> = args.map(|a| a.parse::<f64>()).collect();
    let features = match features {
        Ok(f) => f,
        Err(e) => {
            eprintln!("invalid feature value: {e}");
            return ExitCode::FAILURE;
        }
    };

    let model = match RandomForestModel::load(&path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("failed to load {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let forest = model.forest();
    println!("classes:  {}", forest.num_classes());
    println!("features: {}", forest.num_features());
    println!("trees:    {}", forest.num_trees());
    for (idx, tree) in forest.trees().enumerate() {
        println!("  tree {idx}: {} nodes", tree.num_nodes());
    }

    if !features.is_empty() {
        let result = model.classify(&features);
        println!(
            "classification: label {:?}, {} votes, status {:?}",
            result.label, result.votes, result.status
        );
    }

    ExitCode::SUCCESS
}
