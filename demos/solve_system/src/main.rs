use argh::FromArgs;
use std::path::PathBuf;
use std::str::FromStr;

use jordan::linalg::{Diagonalization, EigenOptions, LinearSystem, Matrix};

#[derive(Debug, Clone, Copy)]
enum Mode {
    Rref,
    Solve,
    Eigen,
    Diagonalize,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rref" => Ok(Mode::Rref),
            "solve" => Ok(Mode::Solve),
            "eigen" => Ok(Mode::Eigen),
            "diagonalize" => Ok(Mode::Diagonalize),
            _ => Err(format!(
                "unknown mode `{s}`, expected rref, solve, eigen or diagonalize"
            )),
        }
    }
}

#[derive(FromArgs)]
/// Row reduce, solve or diagonalize a matrix given as a nested JSON array
struct Args {
    /// the matrix, e.g. '[[1, 2, 3], [4, 5, 6]]'
    #[argh(option, short = 'm')]
    matrix: String,

    /// one of rref, solve, eigen, diagonalize
    #[argh(option, default = "Mode::Solve")]
    mode: Mode,

    /// variable labels, in column order
    #[argh(option, short = 'l')]
    label: Vec<String>,

    /// number of QR iterations
    #[argh(option, short = 'n')]
    iterations: Option<usize>,

    /// round the eigenvalues to integers
    #[argh(switch, short = 'r')]
    rounded: bool,

    /// path to a JSON file with the eigen options
    #[argh(option)]
    options: Option<PathBuf>,
}

fn eigen_options(args: &Args) -> Result<EigenOptions, Box<dyn std::error::Error>> {
    let mut options = match &args.options {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => EigenOptions::default(),
    };
    if let Some(iterations) = args.iterations {
        options = options.with_iterations(iterations);
    }
    if args.rounded {
        options = options.rounded(true);
    }
    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let matrix: Matrix = serde_json::from_str(&args.matrix)?;
    log::info!("loaded a {}x{} matrix", matrix.rows(), matrix.columns());

    match args.mode {
        Mode::Rref => {
            let reduced = matrix.rref();
            print!("{reduced}");
            let pivots = reduced.pivots();
            println!("rank: {}", pivots.len());
        }
        Mode::Solve => {
            let mut system = LinearSystem::with_labels(matrix, args.label.clone())?;
            let solution = system.solve()?;
            println!("consistent: {}", solution.consistent);
            println!("unique: {}", solution.unique);
            for (label, value) in &solution.solutions.values {
                println!("{label} = {value}");
            }
            if let Some(particular) = &solution.solutions.particular {
                println!("vector: {particular}");
            }
            for direction in &solution.solutions.directions {
                println!("{}: {}", direction.label, direction.vector);
            }
        }
        Mode::Eigen => {
            let options = eigen_options(&args)?;
            for pair in matrix.eigenvectors(&options)? {
                println!(
                    "eigenvalue {} (multiplicity {})",
                    pair.eigenvalue, pair.multiplicity
                );
                for vector in &pair.eigenvectors {
                    println!("  {vector}");
                }
            }
        }
        Mode::Diagonalize => {
            let options = eigen_options(&args)?;
            match matrix.diagonalize(&options)? {
                Diagonalization::Diagonalizable { p, d, p_inverse } => {
                    println!("P:\n{p}D:\n{d}P^-1:\n{p_inverse}");
                }
                Diagonalization::NotDiagonalizable => println!("not diagonalizable"),
            }
        }
    }

    Ok(())
}
