//! Script to run an election with random ballots, and print the results.

use clap::{Parser, ValueEnum};
use rand::distributions::{Bernoulli, Distribution};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::Hypergeometric;
use schulze_rs::{Ballot, ElectionResult, Parallel, Voting};

static VEGETABLES: [&str; 20] = [
    "apple", "banana", "cherry", "date", "eggplant", "fig", "grape", "hazelnut", "jalapeno",
    "kiwi", "litchi", "mushroom", "nut", "orange", "pear", "quinoa", "radish", "soy", "tomato",
    "vanilla",
];

/// Rust implementation of the Schulze method, on random ballots.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Number of choices in the election.
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u64).range(1..=20))]
    choices: u64,

    /// Number of ballots to cast.
    #[arg(long, default_value_t = 1000)]
    ballots: usize,

    /// Probability that a ballot ranks any given choice.
    #[arg(long, default_value_t = 0.7)]
    ranked: f64,

    /// Seed of the random generator.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Parallelism to compute the strongest paths.
    #[arg(long, value_enum, default_value = "no")]
    parallel: ParallelArg,

    /// Shuffle the choices and replace the last one by a new choice after
    /// casting the ballots, then compute the results again.
    #[arg(long)]
    update_choices: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ParallelArg {
    /// Compute on a single thread.
    No,
    /// Compute with the rayon crate.
    Rayon,
}

impl From<ParallelArg> for Parallel {
    fn from(value: ParallelArg) -> Self {
        match value {
            ParallelArg::No => Parallel::No,
            ParallelArg::Rayon => Parallel::Rayon,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let num_choices = cli.choices as usize;
    let choices = VEGETABLES[..num_choices].to_vec();
    let mut voting = Voting::builder()
        .choices(choices.clone())
        .parallel(cli.parallel.into())
        .build()
        .unwrap();

    // Each choice gets a different distribution of ranks, so that some
    // choices are preferred over others.
    let distributions = (0..cli.choices)
        .map(|i| Hypergeometric::new(100, 50, 20 + 2 * i).unwrap())
        .collect::<Vec<_>>();
    let is_ranked = Bernoulli::new(cli.ranked).unwrap();

    for _ in 0..cli.ballots {
        let mut ballot = Ballot::new();
        for (&choice, d) in choices.iter().zip(&distributions) {
            if is_ranked.sample(&mut rng) {
                ballot.insert(choice, d.sample(&mut rng) as i64);
            }
        }
        voting.vote(&ballot).unwrap();
    }

    println!("Election with {} ballots", cli.ballots);
    print_result(&voting.compute());

    if cli.update_choices {
        let mut updated = choices;
        updated.shuffle(&mut rng);
        updated.pop();
        updated.push("zucchini");
        voting.set_choices(updated);

        println!();
        println!("Updated choices: {:?}", voting.choices());
        print_result(&voting.compute());
    }
}

fn print_result(result: &ElectionResult<&str>) {
    println!("Ranking:");
    for (i, r) in result.results.iter().enumerate() {
        println!(
            "    {}. {} ({} wins, strength = {}, advantage = {})",
            i + 1,
            r.choice,
            r.wins,
            r.strength,
            r.advantage
        );
    }
    if result.tie {
        let winners = result
            .winners()
            .iter()
            .map(|r| r.choice)
            .collect::<Vec<_>>();
        println!("Tie between {winners:?}");
    }

    println!("Duels:");
    for duel in result.duels() {
        match duel.outcome() {
            Some((winner, defeated)) => println!(
                "    {} beats {} ({} to {})",
                winner.choice, defeated.choice, winner.strength, defeated.strength
            ),
            None => println!(
                "    {} ties with {} ({})",
                duel.left.choice, duel.right.choice, duel.left.strength
            ),
        }
    }
}
