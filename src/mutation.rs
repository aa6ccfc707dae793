use crate::catalog::{Gene, GenesExt};
use crate::chromosome::Chromosome;
use log::trace;
use rand::seq::IndexedRandom;
use rand::Rng;

/// A single allele replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub gene_id: String,
    pub from: char,
    pub to: char,
}

/// Returns a copy of `chromosome` with random point mutations applied
///
/// Each gene mutates with probability `mutation_rate / 100` to a uniformly
/// chosen different allele of the same gene. Genes with a single allele, or
/// missing from `genes`, never mutate.
pub fn apply_mutations<R: Rng + ?Sized>(
    chromosome: &Chromosome,
    mutation_rate: f64,
    genes: &[Gene],
    rng: &mut R,
) -> (Chromosome, Vec<Mutation>) {
    let mut mutated = chromosome.clone();
    let mut mutations = vec![];

    for (gene_id, &symbol) in chromosome.genes() {
        if rng.random::<f64>() >= mutation_rate / 100.0 {
            continue;
        }
        let gene = match genes.gene(gene_id) {
            Some(gene) if gene.alleles().len() > 1 => gene,
            _ => continue,
        };
        let others: Vec<char> = gene
            .alleles()
            .iter()
            .map(|a| a.symbol)
            .filter(|s| *s != symbol)
            .collect();
        if let Some(&to) = others.choose(rng) {
            trace!("mutation on {} at {}: {} -> {}", chromosome.id(), gene_id, symbol, to);
            mutated = mutated.with_allele(gene_id, to);
            mutations.push(Mutation {
                gene_id: gene_id.clone(),
                from: symbol,
                to,
            });
        }
    }

    (mutated, mutations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{pea_catalog, Allele};
    use crate::chromosome::GeneMap;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::error::Error;

    fn strand() -> Chromosome {
        let genes: GeneMap = [("seed-color", 'Y'), ("seed-shape", 'r'), ("plant-height", 'T')]
            .iter()
            .map(|(g, s)| (g.to_string(), *s))
            .collect();
        Chromosome::new("strand", genes, true, "#123")
    }

    #[test]
    fn test_zero_rate_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = pea_catalog();
        let original = strand();
        for _ in 0..100 {
            let (mutated, mutations) = apply_mutations(&original, 0.0, &catalog, &mut rng);
            assert_eq!(mutated, original);
            assert!(mutations.is_empty());
        }
    }

    #[test]
    fn test_full_rate_flips_every_biallelic_gene() {
        let mut rng = StdRng::seed_from_u64(2);
        let catalog = pea_catalog();
        let original = strand();
        let (mutated, mutations) = apply_mutations(&original, 100.0, &catalog, &mut rng);
        assert_eq!(mutations.len(), 3);
        assert_eq!(mutated.allele("seed-color"), Some('y'));
        assert_eq!(mutated.allele("seed-shape"), Some('R'));
        assert_eq!(mutated.allele("plant-height"), Some('t'));
        // the input is untouched
        assert_eq!(original.allele("seed-color"), Some('Y'));
    }

    #[test]
    fn test_single_allele_gene_never_mutates() -> Result<(), Box<dyn Error>> {
        let mut rng = StdRng::seed_from_u64(3);
        let catalog = vec![Gene::new(
            "seed-color",
            "Seed color",
            1.0,
            vec![Allele::dominant('Y', "Yellow", "#ff0")],
        )?];
        let original = strand();
        let (mutated, mutations) = apply_mutations(&original, 100.0, &catalog, &mut rng);
        assert_eq!(mutated, original);
        assert!(mutations.is_empty());
        Ok(())
    }

    #[test]
    fn test_mutation_picks_a_different_allele() -> Result<(), Box<dyn Error>> {
        let mut rng = StdRng::seed_from_u64(4);
        let catalog = vec![Gene::new(
            "seed-color",
            "Seed color",
            1.0,
            vec![
                Allele::dominant('Y', "Yellow", "#ff0"),
                Allele::recessive('y', "Green", "#0f0"),
                Allele::recessive('o', "Orange", "#f80"),
            ],
        )?];
        let original = strand();
        for _ in 0..50 {
            let (mutated, mutations) = apply_mutations(&original, 100.0, &catalog, &mut rng);
            let to = mutated.allele("seed-color").unwrap();
            assert!(to == 'y' || to == 'o');
            assert_eq!(mutations, vec![Mutation { gene_id: "seed-color".into(), from: 'Y', to }]);
        }
        Ok(())
    }
}
