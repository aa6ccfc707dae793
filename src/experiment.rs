use crate::catalog::{Gene, GenesExt};
use crate::chromosome::{Chromosome, Diploid, GeneMap, Individual};
use crate::error::{GeneticsError, Result};
use crate::meiosis::CrossoverModel;
use crate::mutation::{apply_mutations, Mutation};
use crate::phenotype::calculate_phenotype;
use crate::statistics::{calculate_statistics, ExperimentStatistics};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Gene id to the two alleles one parent carries (maternal, paternal)
pub type AlleleAssignment = BTreeMap<String, [char; 2]>;

const MATERNAL_COLOR: &str = "#e74c3c";
const PATERNAL_COLOR: &str = "#3498db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub offspring_count: usize,
    /// Chance of crossing-over per meiosis, in percent
    pub recombination_rate: f64,
    /// Chance of mutation per gene per gamete, in percent
    pub mutation_rate: f64,
    pub crossover: CrossoverModel,
    pub seed: Option<u64>,
    pub maternal_alleles: AlleleAssignment,
    pub paternal_alleles: AlleleAssignment,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            offspring_count: 100,
            recombination_rate: 50.0,
            mutation_rate: 0.0,
            crossover: CrossoverModel::Independent,
            seed: None,
            maternal_alleles: AlleleAssignment::new(),
            paternal_alleles: AlleleAssignment::new(),
        }
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(GeneticsError::InvalidRate { name, value })
    }
}

impl ExperimentConfig {
    pub fn builder() -> ExperimentConfigBuilder {
        ExperimentConfigBuilder::new()
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        check_rate("recombination_rate", config.recombination_rate)?;
        check_rate("mutation_rate", config.mutation_rate)?;
        Ok(config)
    }

    /// Checks the allele assignments against a catalog
    ///
    /// Both parents must assign the same genes, every gene must be in the
    /// catalog and every symbol must be one of the gene's alleles.
    pub fn validate(&self, genes: &[Gene]) -> Result<()> {
        check_rate("recombination_rate", self.recombination_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;

        let parents = [
            ("mother", &self.maternal_alleles, &self.paternal_alleles),
            ("father", &self.paternal_alleles, &self.maternal_alleles),
        ];
        for (_, assignment, _) in parents.iter() {
            for (gene_id, symbols) in assignment.iter() {
                let gene = genes
                    .gene(gene_id)
                    .ok_or_else(|| GeneticsError::UnknownGene(gene_id.clone()))?;
                for &symbol in symbols {
                    if !gene.has_allele(symbol) {
                        return Err(GeneticsError::UnknownAllele {
                            gene: gene_id.clone(),
                            symbol,
                        });
                    }
                }
            }
        }
        for (parent, assignment, other) in parents.iter() {
            if let Some(gene) = other.keys().find(|g| !assignment.contains_key(*g)) {
                return Err(GeneticsError::MissingAssignment {
                    parent: *parent,
                    gene: gene.clone(),
                });
            }
        }
        Ok(())
    }

    /// Catalog genes taking part in the cross, in catalog order
    pub fn active_genes(&self, genes: &[Gene]) -> Vec<Gene> {
        genes
            .iter()
            .filter(|g| self.maternal_alleles.contains_key(g.id()))
            .cloned()
            .collect()
    }

    /// Builds the mother and the father from the allele assignments
    pub fn parents(&self, genes: &[Gene]) -> Result<(Individual, Individual)> {
        self.validate(genes)?;
        Ok((
            build_parent("mother", &self.maternal_alleles),
            build_parent("father", &self.paternal_alleles),
        ))
    }
}

fn build_parent(label: &str, assignment: &AlleleAssignment) -> Individual {
    let strand = |i: usize| -> GeneMap {
        assignment
            .iter()
            .map(|(gene_id, symbols)| (gene_id.clone(), symbols[i]))
            .collect()
    };
    Individual::new(
        Chromosome::new(&format!("{}-maternal", label), strand(0), false, MATERNAL_COLOR),
        Chromosome::new(&format!("{}-paternal", label), strand(1), true, PATERNAL_COLOR),
    )
}

pub struct ExperimentConfigBuilder {
    config: ExperimentConfig,
}

impl ExperimentConfigBuilder {
    /// Construct a new builder holding the default configuration
    pub fn new() -> Self {
        Self {
            config: ExperimentConfig::default(),
        }
    }

    pub fn offspring_count(&mut self, offspring_count: usize) -> &mut Self {
        self.config.offspring_count = offspring_count;
        self
    }

    pub fn recombination_rate(&mut self, recombination_rate: f64) -> &mut Self {
        self.config.recombination_rate = recombination_rate;
        self
    }

    pub fn mutation_rate(&mut self, mutation_rate: f64) -> &mut Self {
        self.config.mutation_rate = mutation_rate;
        self
    }

    pub fn crossover(&mut self, crossover: CrossoverModel) -> &mut Self {
        self.config.crossover = crossover;
        self
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.config.seed = Some(seed);
        self
    }

    /// Assigns one gene to both parents
    pub fn cross(&mut self, gene_id: &str, mother: [char; 2], father: [char; 2]) -> &mut Self {
        self.config.maternal_alleles.insert(gene_id.into(), mother);
        self.config.paternal_alleles.insert(gene_id.into(), father);
        self
    }

    pub fn build(&self) -> Result<ExperimentConfig> {
        check_rate("recombination_rate", self.config.recombination_rate)?;
        check_rate("mutation_rate", self.config.mutation_rate)?;
        Ok(self.config.clone())
    }
}

impl Default for ExperimentConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Offspring {
    id: String,
    generation: u32,
    maternal: Chromosome,
    paternal: Chromosome,
    phenotype: BTreeMap<String, String>,
    mutations: Vec<Mutation>,
}

impl Offspring {
    /// Assembles an offspring and resolves its phenotype for `genes`
    pub fn new(
        id: &str,
        generation: u32,
        maternal: Chromosome,
        paternal: Chromosome,
        genes: &[Gene],
    ) -> Self {
        let mut offspring = Self {
            id: id.into(),
            generation,
            maternal,
            paternal,
            phenotype: BTreeMap::new(),
            mutations: vec![],
        };
        offspring.phenotype = genes
            .iter()
            .map(|g| (g.id().to_string(), calculate_phenotype(g, &offspring)))
            .collect();
        offspring
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn phenotype(&self) -> &BTreeMap<String, String> {
        &self.phenotype
    }

    /// Mutations applied to the two gametes this offspring came from
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }
}

impl Diploid for Offspring {
    fn maternal(&self) -> &Chromosome {
        &self.maternal
    }

    fn paternal(&self) -> &Chromosome {
        &self.paternal
    }
}

fn gamete<R: Rng + ?Sized>(
    parent: &Individual,
    config: &ExperimentConfig,
    genes: &[Gene],
    id: &str,
    rng: &mut R,
) -> (Chromosome, Vec<Mutation>) {
    let chromosome = config.crossover.meiosis(
        parent.maternal(),
        parent.paternal(),
        config.recombination_rate,
        genes,
        rng,
    );
    let (chromosome, mutations) = apply_mutations(&chromosome, config.mutation_rate, genes, rng);
    (chromosome.with_id(id), mutations)
}

fn breed<R: Rng + ?Sized>(
    mother: &Individual,
    father: &Individual,
    config: &ExperimentConfig,
    genes: &[Gene],
    generation: u32,
    rng: &mut R,
) -> Vec<Offspring> {
    let offspring: Vec<Offspring> = (0..config.offspring_count)
        .map(|i| {
            let id = format!("offspring-{}-{}", generation, i);
            let (maternal, mut mutations) =
                gamete(mother, config, genes, &format!("{}-maternal", id), rng);
            let (paternal, paternal_mutations) =
                gamete(father, config, genes, &format!("{}-paternal", id), rng);
            mutations.extend(paternal_mutations);
            let mut child = Offspring::new(&id, generation, maternal, paternal, genes);
            child.mutations = mutations;
            child
        })
        .collect();

    debug!(
        "generation {}: {} offspring, {} mutations",
        generation,
        offspring.len(),
        offspring.iter().map(|o| o.mutations.len()).sum::<usize>()
    );
    offspring
}

/// Crosses the configured parents `config.offspring_count` times
///
/// Each offspring receives one gamete from the mother and one from the
/// father. Phenotypes are resolved for the genes taking part in the cross.
pub fn generate_offspring<R: Rng + ?Sized>(
    config: &ExperimentConfig,
    genes: &[Gene],
    generation: u32,
    rng: &mut R,
) -> Result<Vec<Offspring>> {
    let (mother, father) = config.parents(genes)?;
    let active = config.active_genes(genes);
    Ok(breed(&mother, &father, config, &active, generation, rng))
}

/// One press of "generate"
#[derive(Debug, Clone)]
pub struct Batch {
    pub generation: u32,
    pub offspring: Vec<Offspring>,
    pub statistics: ExperimentStatistics,
}

/// Owns a validated configuration and the random source of a cross
pub struct Experiment {
    config: ExperimentConfig,
    genes: Vec<Gene>,
    mother: Individual,
    father: Individual,
    rng: StdRng,
    generation: u32,
}

impl Experiment {
    pub fn new(config: ExperimentConfig, catalog: &[Gene]) -> Result<Self> {
        let (mother, father) = config.parents(catalog)?;
        let genes = config.active_genes(catalog);
        info!(
            "experiment over {} genes, {} offspring per generation, seed {:?}",
            genes.len(),
            config.offspring_count,
            config.seed
        );
        Ok(Self {
            rng: Self::seed(&config),
            config,
            genes,
            mother,
            father,
            generation: 0,
        })
    }

    fn seed(config: &ExperimentConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Genes taking part in the cross
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn mother(&self) -> &Individual {
        &self.mother
    }

    pub fn father(&self) -> &Individual {
        &self.father
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Breeds the next generation from the parents built in `new`
    pub fn generate(&mut self) -> Batch {
        self.generation += 1;
        let offspring = breed(
            &self.mother,
            &self.father,
            &self.config,
            &self.genes,
            self.generation,
            &mut self.rng,
        );
        let statistics = calculate_statistics(&offspring, &self.genes);
        Batch {
            generation: self.generation,
            offspring,
            statistics,
        }
    }

    /// Forgets every generation and restarts the random source
    pub fn reset(&mut self) {
        info!("experiment reset after {} generations", self.generation);
        self.generation = 0;
        self.rng = Self::seed(&self.config);
    }
}
