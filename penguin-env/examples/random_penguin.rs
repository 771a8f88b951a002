use anyhow::Result;
use clap::Parser;
use penguin_core::{
    record::{BufferedRecorder, NullRecorder, Record},
    util, Env as _, Policy,
};
use penguin_env::{PenguinAct, PenguinEnv, PenguinEnvConfig, PenguinObs};
use serde::Serialize;
use std::{convert::TryFrom, fs::File};

type Env = PenguinEnv;

struct RandomPolicy {}

impl Policy<Env> for RandomPolicy {
    fn sample(&mut self, _: &PenguinObs) -> PenguinAct {
        let branches = [fastrand::i32(0..2), fastrand::i32(0..3)];
        PenguinAct::from_branches(&branches).unwrap_or_else(|_| PenguinAct::idle())
    }
}

#[derive(Debug, Serialize)]
struct PenguinRecord {
    episode: usize,
    step: usize,
    reward: f32,
    fish_remaining: usize,
    obs: Vec<f32>,
}

impl TryFrom<&Record> for PenguinRecord {
    type Error = anyhow::Error;

    fn try_from(record: &Record) -> Result<Self> {
        Ok(Self {
            episode: record.get_scalar("episode")? as _,
            step: record.get_scalar("step")? as _,
            reward: record.get_scalar("reward")?,
            fish_remaining: record.get_scalar("fish_remaining")? as _,
            obs: record.get_array1("obs")?,
        })
    }
}

/// Run a random policy in the penguin environment
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of episodes
    #[arg(short, long, default_value_t = 3)]
    n_episodes: usize,

    /// Step budget of an episode
    #[arg(short, long, default_value_t = 5000)]
    max_steps: usize,

    /// Random seed of the environment and the policy
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// YAML file with the environment configuration
    #[arg(short, long)]
    config: Option<String>,

    /// Where to write per-step records as CSV
    #[arg(short, long)]
    output: Option<String>,
}

fn run(args: &Args) -> Result<Vec<f32>> {
    fastrand::seed(args.seed);

    let env_config = match &args.config {
        Some(path) => PenguinEnvConfig::load(path)?,
        None => PenguinEnvConfig::default(),
    }
    .max_steps(Some(args.max_steps));
    let mut env = Env::build(&env_config, args.seed as i64)?;
    let mut policy = RandomPolicy {};
    let n_episodes = args.n_episodes;

    let path = match &args.output {
        Some(path) => path,
        None => {
            let mut recorder = NullRecorder::new();
            return util::eval_with_recorder(&mut env, &mut policy, n_episodes, &mut recorder);
        }
    };

    let mut recorder = BufferedRecorder::new();
    let returns = util::eval_with_recorder(&mut env, &mut policy, n_episodes, &mut recorder)?;

    // Vec<_> field in a struct does not support writing a header in csv crate, so disable it.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(File::create(path)?);
    for record in recorder.iter() {
        wtr.serialize(PenguinRecord::try_from(record)?)?;
    }
    wtr.flush()?;

    Ok(returns)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let returns = run(&args)?;
    log::info!("Returns: {:?}", returns);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, Args};
    use anyhow::Result;
    use tempdir::TempDir;

    #[test]
    fn test_random_penguin() -> Result<()> {
        let tmp_dir = TempDir::new("random_penguin")?;
        let output = tmp_dir.path().join("random_penguin.csv");
        let args = Args {
            n_episodes: 2,
            max_steps: 50,
            seed: 0,
            config: None,
            output: Some(output.to_string_lossy().into_owned()),
        };

        let returns = run(&args)?;
        assert_eq!(returns.len(), 2);
        let n_rows = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&output)?
            .records()
            .count();
        assert!(n_rows > 0 && n_rows <= 100);
        Ok(())
    }

    #[test]
    fn test_random_penguin_without_output() -> Result<()> {
        let args = Args {
            n_episodes: 2,
            max_steps: 20,
            seed: 1,
            config: None,
            output: None,
        };

        let returns = run(&args)?;
        assert_eq!(returns.len(), 2);
        assert!(returns.iter().all(|r| *r >= -1.0 - 1e-4));
        Ok(())
    }
}
