use clap::Parser;
use log::{info, warn};
use mendelian::prelude::*;
use std::error::Error;
use std::fs::{self, File};
use std::path::PathBuf;

/// Runs a Mendelian cross and prints what the offspring look like
#[derive(Parser, Debug)]
#[command(name = "mendelian", version, about)]
struct Args {
    /// Gene catalog CSV (gene_id,gene_name,locus,symbol,allele_name,color,dominant)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Experiment configuration in TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Offspring per generation
    #[arg(long)]
    offspring: Option<usize>,

    /// Number of batches to generate
    #[arg(long, default_value_t = 1)]
    generations: u32,

    /// Use single cut-point crossover along gene loci
    #[arg(long)]
    linked: bool,

    /// Write every offspring to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ExperimentConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_toml_str(&fs::read_to_string(path)?)?,
        None => ExperimentConfig::builder()
            .recombination_rate(0.0)
            .cross("seed-color", ['Y', 'y'], ['Y', 'y'])
            .build()?,
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(offspring) = args.offspring {
        config.offspring_count = offspring;
    }
    if args.linked {
        config.crossover = CrossoverModel::Linked;
    }
    Ok(config)
}

fn report(batch: &Batch, experiment: &Experiment) -> Result<(), Box<dyn Error>> {
    println!("generation {} ({} offspring)", batch.generation, batch.statistics.total_offspring);
    for gene in experiment.genes() {
        let stats = match batch.statistics.gene(gene.id()) {
            Some(stats) => stats,
            None => continue,
        };
        println!("  {}", gene.name());
        for (symbol, count) in &stats.allele_frequency {
            println!("    allele {}: {}", symbol, count);
        }
        for (genotype, count) in &stats.genotype_frequency {
            println!("    genotype {}: {}", genotype, count);
        }
        for (phenotype, count) in &stats.phenotype_frequency {
            println!("    phenotype {}: {}", phenotype, count);
        }

        let square = PunnettSquare::new(gene, experiment.mother(), experiment.father())?;
        let expected: Vec<usize> = square.phenotype_ratio().iter().map(|(_, n)| *n).collect();
        println!("    expected phenotype ratio {}", ratio_label(&expected));
        match test_phenotypes(stats, &square) {
            Ok(result) => println!(
                "    chi-square {:.3} (df {}, {}){}",
                result.chi_square,
                result.degrees_of_freedom,
                result.p_value,
                if result.significant { ", departs from expectation" } else { "" }
            ),
            Err(e) => warn!("no chi-square test for {}: {}", gene.id(), e),
        }
    }
    println!(
        "  mendelian 3:1 ratio {}",
        if batch.statistics.mendelian_ratio_match { "matched" } else { "not matched" }
    );

    if experiment.genes().len() > 1 {
        let matrix = AlleleMatrix::from_offspring(&batch.offspring, experiment.genes());
        match matrix.index_of_association() {
            Ok(summary) => println!("  index of association {:.4}", summary.index_of_association),
            Err(e) => warn!("no index of association: {}", e),
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => CatalogCsvBuilder::new().from_reader(File::open(path)?)?,
        None => pea_catalog(),
    };
    let config = load_config(&args)?;
    let mut experiment = Experiment::new(config, &catalog)?;

    let mut offspring = vec![];
    for _ in 0..args.generations {
        let batch = experiment.generate();
        report(&batch, &experiment)?;
        offspring.extend(batch.offspring);
    }

    if let Some(path) = &args.output {
        write_offspring(&offspring, experiment.genes(), File::create(path)?)?;
        info!("wrote {} offspring to {}", offspring.len(), path.display());
    }
    Ok(())
}
