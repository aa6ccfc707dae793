pub use crate::catalog::{pea_catalog, Allele, Gene, GenesExt};
pub use crate::chi_square::{calculate_chi_square, test_phenotypes, ChiSquareResult, PValue};
pub use crate::chromosome::{Chromosome, Diploid, GeneMap, Individual};
pub use crate::error::GeneticsError;
pub use crate::experiment::{
    generate_offspring, AlleleAssignment, Batch, Experiment, ExperimentConfig,
    ExperimentConfigBuilder, Offspring,
};
pub use crate::index_of_association::{IndexOfAssociation, IndexOfAssociationSummary};
pub use crate::io::{write_offspring, CatalogCsvBuilder};
pub use crate::matrix::AlleleMatrix;
pub use crate::meiosis::{simulate_linked_meiosis, simulate_meiosis, CrossoverModel};
pub use crate::mutation::{apply_mutations, Mutation};
pub use crate::phenotype::{calculate_phenotype, get_genotype, UNKNOWN_PHENOTYPE};
pub use crate::punnett::{ratio_label, PunnettSquare};
pub use crate::statistics::{calculate_statistics, ExperimentStatistics, GeneStatistics};
