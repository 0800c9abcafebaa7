use perceptron::{Activations, Dataset, Dense, Hyper, Network, Result};
use rand::{thread_rng, Rng};
use tracing_subscriber::EnvFilter;

fn gen_xy(size: usize) -> Dataset {
    let mut rng = thread_rng();

    let mutator = |x: f64| x.powi(2);

    let (mut x, mut y): Dataset = (vec![], vec![]);

    for _ in 0..size {
        let xv: f64 = rng.gen_range(0.0..1.0);
        x.push(vec![xv]);
        y.push(vec![mutator(xv)]);
    }

    (x, y)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (x, y) = gen_xy(2000);

    let mut nn = Network::new(
        vec![
            Dense::input(1, true)?,
            Dense::new(8, Some(Activations::SoftPlus), true)?,
            Dense::new(1, Some(Activations::Sigmoid), false)?,
        ],
        0.3,
    )?;

    let hyper = Hyper {
        epochs: 200,
        batch_size: 4,
        ..Hyper::default()
    };
    nn.train(&x, &y, hyper)?;

    let (x, y) = gen_xy(10);
    for (x, y) in x.iter().zip(y.iter()) {
        let y_pred = nn.predict(x)?;
        println!("{:?} =?= {:?}", y_pred, y);
    }

    Ok(())
}
