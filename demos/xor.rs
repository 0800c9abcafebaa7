use perceptron::{Dense, Network, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let x = vec![vec![0., 0.], vec![0., 1.], vec![1., 0.], vec![1., 1.]];
    let y = vec![vec![0.], vec![1.], vec![1.], vec![0.]];

    let mut nn = Network::new(
        vec![
            Dense::input(2, true)?,
            Dense::named(3, "sigmoid", true)?,
            Dense::named(1, "sigmoid", false)?,
        ],
        0.5,
    )?;

    nn.get_trainer()
        .set_epochs(5000)
        .set_batch_size(1)
        .train(&x, &y)?;

    for (x, y) in x.iter().zip(y.iter()) {
        let y_pred = nn.predict(x)?;
        println!("{:?} -> {:.3} (expected {})", x, y_pred[0], y[0]);
    }

    let losses = nn.losses();
    println!("Loss: {:.5} -> {:.5}", losses[0], losses[losses.len() - 1]);

    Ok(())
}
