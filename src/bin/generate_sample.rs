//! Writes a synthetic red-wine dataset with the same schema and delimiter as
//! `winequality-red.csv`, so the dashboard can run without the real file.
//!
//! Usage: `generate_sample [OUTPUT] [ROWS] [--seed N]`

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic semicolon-delimited red-wine dataset
#[derive(Parser, Debug)]
#[command(name = "generate_sample", version, about, long_about = None)]
struct Args {
    /// Output file
    #[arg(default_value = "winequality-red.csv")]
    output: String,

    /// Number of data rows
    #[arg(default_value_t = 1599)]
    rows: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Standard normal draw (Box-Muller).
    fn normal(&mut self) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Column definition: name, mean, std, min, max, printed decimals.
struct Attribute {
    name: &'static str,
    mean: f64,
    std: f64,
    min: f64,
    max: f64,
    decimals: usize,
}

const fn attr(name: &'static str, mean: f64, std: f64, min: f64, max: f64, decimals: usize) -> Attribute {
    Attribute {
        name,
        mean,
        std,
        min,
        max,
        decimals,
    }
}

const ATTRIBUTES: [Attribute; 11] = [
    attr("fixed acidity", 8.32, 1.74, 4.6, 15.9, 1),
    attr("volatile acidity", 0.53, 0.18, 0.12, 1.58, 3),
    attr("citric acid", 0.27, 0.19, 0.0, 1.0, 2),
    attr("residual sugar", 2.54, 1.41, 0.9, 15.5, 1),
    attr("chlorides", 0.087, 0.047, 0.012, 0.611, 3),
    attr("free sulfur dioxide", 15.9, 10.5, 1.0, 72.0, 0),
    attr("total sulfur dioxide", 46.5, 32.9, 6.0, 289.0, 0),
    attr("density", 0.9967, 0.0019, 0.990, 1.004, 5),
    attr("pH", 3.31, 0.15, 2.74, 4.01, 2),
    attr("sulphates", 0.66, 0.17, 0.33, 2.0, 2),
    attr("alcohol", 10.42, 1.07, 8.4, 14.9, 1),
];

/// One row of standardised scores, correlated through two latent factors:
/// acidity (fixed acidity, citric acid, pH, density) and body (alcohol,
/// density, quality).
fn sample_row(rng: &mut SimpleRng) -> ([f64; 11], f64) {
    let acidity = rng.normal();
    let body = rng.normal();
    let mut z = [0.0; 11];
    for v in &mut z {
        *v = rng.normal();
    }

    z[0] = 0.8 * acidity + 0.6 * z[0];
    z[2] = 0.65 * acidity + 0.76 * z[2];
    z[8] = -0.68 * acidity + 0.73 * z[8];
    z[7] = 0.55 * acidity - 0.5 * body + 0.67 * z[7];
    z[10] = 0.85 * body + 0.53 * z[10];
    z[6] = 0.67 * z[5] + 0.74 * z[6];

    let quality_score = 0.48 * z[10] - 0.39 * z[1] + 0.25 * z[9] + 0.75 * rng.normal();
    (z, quality_score)
}

fn main() -> Result<()> {
    let Args {
        output: output_path,
        rows,
        seed,
    } = Args::parse();

    let mut rng = SimpleRng::new(seed);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut header: Vec<&str> = ATTRIBUTES.iter().map(|a| a.name).collect();
    header.push("quality");
    writer.write_record(&header).context("writing header")?;

    for _ in 0..rows {
        let (z, quality_score) = sample_row(&mut rng);
        let mut record: Vec<String> = ATTRIBUTES
            .iter()
            .zip(z)
            .map(|(a, score)| {
                let value = (a.mean + a.std * score).clamp(a.min, a.max);
                format!("{value:.prec$}", prec = a.decimals)
            })
            .collect();
        let quality = (5.64 + 0.81 * quality_score).round().clamp(3.0, 8.0);
        record.push(format!("{quality:.0}"));
        writer.write_record(&record).context("writing row")?;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults_match_the_real_file() {
        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.output, "winequality-red.csv");
        assert_eq!(args.rows, 1599);
        assert_eq!(args.seed, 42);
    }

    #[test]
    fn help_does_not_become_an_output_path() {
        let err = Args::try_parse_from(["generate_sample", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn non_numeric_row_count_is_rejected() {
        let err = Args::try_parse_from(["generate_sample", "out.csv", "many"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn sampled_scores_are_finite() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..200 {
            let (z, _) = sample_row(&mut rng);
            assert!(z.iter().all(|v| v.is_finite()));
        }
    }
}
