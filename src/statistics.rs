use crate::catalog::Gene;
use crate::experiment::Offspring;
use crate::matrix::AlleleMatrix;
use crate::phenotype::{calculate_phenotype, get_genotype};
use std::collections::BTreeMap;

/// Ratio assumed for every gene: a heterozygote x heterozygote monohybrid cross
pub const EXPECTED_RATIO: &str = "3:1";

/// Accepted band around 3:1 for the more frequent over the less frequent phenotype
pub const RATIO_TOLERANCE: (f64, f64) = (2.0, 4.0);

#[derive(Debug, Clone, PartialEq)]
pub struct GeneStatistics {
    pub gene_id: String,
    pub allele_frequency: BTreeMap<char, usize>,
    pub phenotype_frequency: BTreeMap<String, usize>,
    pub genotype_frequency: BTreeMap<String, usize>,
    pub expected_ratio: String,
}

impl GeneStatistics {
    /// Share of each allele among all observed alleles of the gene
    pub fn allele_proportions(&self) -> BTreeMap<char, f64> {
        let total: usize = self.allele_frequency.values().sum();
        self.allele_frequency
            .iter()
            .map(|(symbol, count)| (*symbol, *count as f64 / total as f64))
            .collect()
    }

    /// Two phenotypes whose larger over smaller count lies in the 3:1 band
    pub fn matches_mendelian_ratio(&self) -> bool {
        if self.phenotype_frequency.len() != 2 {
            return false;
        }
        let counts: Vec<usize> = self.phenotype_frequency.values().copied().collect();
        let (major, minor) = (counts[0].max(counts[1]), counts[0].min(counts[1]));
        if minor == 0 {
            return false;
        }
        let ratio = major as f64 / minor as f64;
        ratio >= RATIO_TOLERANCE.0 && ratio <= RATIO_TOLERANCE.1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentStatistics {
    pub total_offspring: usize,
    /// One entry per gene, in the order the genes were given
    pub genes: Vec<GeneStatistics>,
    pub mendelian_ratio_match: bool,
}

impl ExperimentStatistics {
    pub fn gene(&self, gene_id: &str) -> Option<&GeneStatistics> {
        self.genes.iter().find(|g| g.gene_id == gene_id)
    }
}

/// Tallies alleles, genotypes and phenotypes of a batch of offspring
pub fn calculate_statistics(offspring: &[Offspring], genes: &[Gene]) -> ExperimentStatistics {
    let matrix = AlleleMatrix::from_offspring(offspring, genes);

    let stats: Vec<GeneStatistics> = genes
        .iter()
        .enumerate()
        .map(|(locus, gene)| {
            let allele_frequency = matrix
                .allele_counts(locus)
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(symbol, count)| (symbol, count as usize))
                .collect();

            let mut phenotype_frequency = BTreeMap::new();
            let mut genotype_frequency = BTreeMap::new();
            for child in offspring {
                *phenotype_frequency
                    .entry(calculate_phenotype(gene, child))
                    .or_insert(0) += 1;
                *genotype_frequency.entry(get_genotype(gene, child)).or_insert(0) += 1;
            }

            GeneStatistics {
                gene_id: gene.id().to_string(),
                allele_frequency,
                phenotype_frequency,
                genotype_frequency,
                expected_ratio: EXPECTED_RATIO.to_string(),
            }
        })
        .collect();

    ExperimentStatistics {
        total_offspring: offspring.len(),
        mendelian_ratio_match: stats.iter().all(|s| s.matches_mendelian_ratio()),
        genes: stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{pea_catalog, GenesExt};
    use crate::chromosome::{Chromosome, GeneMap};

    fn batch(genotypes: &[(char, char)], genes: &[Gene]) -> Vec<Offspring> {
        genotypes
            .iter()
            .enumerate()
            .map(|(i, (m, p))| {
                let strand =
                    |s: char| -> GeneMap { [("seed-color".to_string(), s)].into_iter().collect() };
                Offspring::new(
                    &format!("o{}", i),
                    1,
                    Chromosome::new("m", strand(*m), false, "#f00"),
                    Chromosome::new("p", strand(*p), true, "#00f"),
                    genes,
                )
            })
            .collect()
    }

    fn seed_color() -> Vec<Gene> {
        vec![pea_catalog().gene("seed-color").cloned().unwrap()]
    }

    #[test]
    fn test_exact_three_to_one_matches() {
        let genes = seed_color();
        let offspring = batch(&[('Y', 'Y'), ('Y', 'y'), ('y', 'Y'), ('y', 'y')], &genes);
        let stats = calculate_statistics(&offspring, &genes);
        let seed = stats.gene("seed-color").unwrap();

        assert_eq!(stats.total_offspring, 4);
        assert_eq!(seed.allele_frequency[&'Y'], 4);
        assert_eq!(seed.allele_frequency[&'y'], 4);
        assert_eq!(seed.phenotype_frequency["Yellow"], 3);
        assert_eq!(seed.phenotype_frequency["Green"], 1);
        assert_eq!(seed.genotype_frequency["Yy"], 2);
        assert_eq!(seed.expected_ratio, "3:1");
        assert_eq!(seed.allele_proportions()[&'Y'], 0.5);
        assert!(stats.mendelian_ratio_match);
    }

    #[test]
    fn test_phenotype_counts_sum_to_offspring() {
        let genes = seed_color();
        let offspring = batch(&[('Y', 'y'); 37], &genes);
        let stats = calculate_statistics(&offspring, &genes);
        for gene in &stats.genes {
            assert_eq!(gene.phenotype_frequency.values().sum::<usize>(), 37);
        }
    }

    #[test]
    fn test_single_phenotype_does_not_match() {
        let genes = seed_color();
        let offspring = batch(&[('Y', 'y'); 10], &genes);
        let stats = calculate_statistics(&offspring, &genes);
        assert!(!stats.mendelian_ratio_match);
        assert!(!stats.genes[0].allele_frequency.is_empty());
    }

    #[test]
    fn test_ratio_outside_band_does_not_match() {
        let genes = seed_color();
        let mut genotypes = vec![('Y', 'y'); 9];
        genotypes.push(('y', 'y'));
        let stats = calculate_statistics(&batch(&genotypes, &genes), &genes);
        assert!(!stats.mendelian_ratio_match);

        let genotypes = [('Y', 'y'), ('Y', 'y'), ('y', 'y')];
        let stats = calculate_statistics(&batch(&genotypes, &genes), &genes);
        assert!(stats.mendelian_ratio_match);
    }

    #[test]
    fn test_no_genes_matches_vacuously() {
        let stats = calculate_statistics(&[], &[]);
        assert_eq!(stats.total_offspring, 0);
        assert!(stats.mendelian_ratio_match);
    }
}
