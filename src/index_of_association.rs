use crate::error::{GeneticsError, Result};
use crate::matrix::AlleleMatrix;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexOfAssociationSummary {
    /// Variance of the summed distances over the sum of per-locus variances, minus one
    pub index_of_association: f64,
    pub observed_variance: f64,
    pub expected_variance: f64,
}

/// Multilocus linkage disequilibrium
///
/// Loci that are inherited independently give an index near zero; loci that
/// travel together push it above zero.
pub trait IndexOfAssociation {
    fn index_of_association(&self) -> Result<IndexOfAssociationSummary>;
}

/// Running sum and sum of squares of one distance series
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    sum: f64,
    sum_sq: f64,
}

impl Moments {
    fn push(&mut self, x: f64) {
        self.sum += x;
        self.sum_sq += x * x;
    }

    fn variance(&self, n: f64) -> f64 {
        (self.sum_sq - self.sum * self.sum / n) / n
    }
}

impl IndexOfAssociation for AlleleMatrix {
    /// Pairs are visited one at a time, so memory stays linear in the
    /// number of individuals while time grows with the number of pairs.
    fn index_of_association(&self) -> Result<IndexOfAssociationSummary> {
        let n_individuals = self.individuals();
        if n_individuals < 2 {
            return Err(GeneticsError::InsufficientData(
                "index of association needs two individuals",
            ));
        }

        let freqs = self.frequency();
        let mut per_locus = vec![Moments::default(); self.loci.len()];
        let mut total = Moments::default();

        for i in 0..n_individuals - 1 {
            for j in (i + 1)..n_individuals {
                let mut pair_distance = 0.0;
                for ((start, end), moments) in self.loci.iter().zip(per_locus.iter_mut()) {
                    let distance: f64 = (*start..*end)
                        .map(|c| (freqs[[i, c]] - freqs[[j, c]]).abs())
                        .sum();
                    moments.push(distance);
                    pair_distance += distance;
                }
                total.push(pair_distance);
            }
        }

        let n = (n_individuals * (n_individuals - 1) / 2) as f64;
        let observed_variance = total.variance(n);
        let expected_variance: f64 = per_locus.iter().map(|m| m.variance(n)).sum();

        if expected_variance <= 0.0 {
            return Err(GeneticsError::InsufficientData("no locus varies between individuals"));
        }

        Ok(IndexOfAssociationSummary {
            index_of_association: observed_variance / expected_variance - 1.0,
            observed_variance,
            expected_variance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::pea_catalog;
    use crate::catalog::Gene;
    use crate::chromosome::{Chromosome, GeneMap};
    use crate::experiment::{Experiment, ExperimentConfig, Offspring};
    use crate::meiosis::CrossoverModel;
    use std::error::Error;

    fn homozygote(id: &str, color: char, shape: char, genes: &[Gene]) -> Offspring {
        let strand: GeneMap = [("seed-color".to_string(), color), ("seed-shape".to_string(), shape)]
            .into_iter()
            .collect();
        Offspring::new(
            id,
            1,
            Chromosome::new("m", strand.clone(), false, "#f00"),
            Chromosome::new("p", strand, true, "#00f"),
            genes,
        )
    }

    fn two_genes() -> Vec<Gene> {
        pea_catalog().into_iter().take(2).collect()
    }

    #[test]
    fn test_fully_associated_loci() -> std::result::Result<(), Box<dyn Error>> {
        let genes = two_genes();
        let offspring = vec![
            homozygote("a", 'Y', 'R', &genes),
            homozygote("b", 'y', 'r', &genes),
            homozygote("c", 'Y', 'R', &genes),
        ];
        let summary = AlleleMatrix::from_offspring(&offspring, &genes).index_of_association()?;
        assert!((summary.observed_variance - 32.0 / 9.0).abs() < 1e-9);
        assert!((summary.expected_variance - 16.0 / 9.0).abs() < 1e-9);
        assert!((summary.index_of_association - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_balanced_loci() -> std::result::Result<(), Box<dyn Error>> {
        let genes = two_genes();
        let offspring = vec![
            homozygote("a", 'Y', 'R', &genes),
            homozygote("b", 'Y', 'r', &genes),
            homozygote("c", 'y', 'R', &genes),
            homozygote("d", 'y', 'r', &genes),
        ];
        let summary = AlleleMatrix::from_offspring(&offspring, &genes).index_of_association()?;
        assert!((summary.index_of_association + 0.5).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_needs_variation() {
        let genes = two_genes();
        let one = vec![homozygote("a", 'Y', 'R', &genes)];
        assert!(AlleleMatrix::from_offspring(&one, &genes).index_of_association().is_err());

        let clones = vec![homozygote("a", 'Y', 'R', &genes), homozygote("b", 'Y', 'R', &genes)];
        assert!(matches!(
            AlleleMatrix::from_offspring(&clones, &genes).index_of_association(),
            Err(GeneticsError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_large_batch_streams_pairs() -> std::result::Result<(), Box<dyn Error>> {
        // two million pairs; only the running sums are kept
        let genes = two_genes();
        let offspring: Vec<Offspring> = (0..2000)
            .map(|i| {
                let color = if i % 2 == 0 { 'Y' } else { 'y' };
                let shape = if i % 4 < 2 { 'R' } else { 'r' };
                homozygote(&format!("o{}", i), color, shape, &genes)
            })
            .collect();
        let summary = AlleleMatrix::from_offspring(&offspring, &genes).index_of_association()?;
        // both loci split 1000/1000 and are balanced against each other
        assert!(summary.index_of_association.abs() < 1e-3);
        assert!(summary.expected_variance > 0.0);
        Ok(())
    }

    #[test]
    fn test_linked_crossover_raises_association() -> std::result::Result<(), Box<dyn Error>> {
        let catalog = pea_catalog();
        let run = |crossover: CrossoverModel| -> std::result::Result<f64, Box<dyn Error>> {
            let config = ExperimentConfig::builder()
                .offspring_count(600)
                .recombination_rate(100.0)
                .crossover(crossover)
                .seed(99)
                .cross("seed-color", ['Y', 'y'], ['Y', 'y'])
                .cross("seed-shape", ['R', 'r'], ['R', 'r'])
                .build()?;
            let mut experiment = Experiment::new(config, &catalog)?;
            let batch = experiment.generate();
            let matrix = AlleleMatrix::from_offspring(&batch.offspring, experiment.genes());
            Ok(matrix.index_of_association()?.index_of_association)
        };
        // every cut falls between the two loci, so each gamete is Yr or yR
        // and the loci vary in lockstep
        let linked = run(CrossoverModel::Linked)?;
        let independent = run(CrossoverModel::Independent)?;
        assert!((linked - 1.0).abs() < 1e-9);
        assert!(independent.abs() < 0.3);
        Ok(())
    }
}
