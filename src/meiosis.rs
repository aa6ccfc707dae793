use crate::catalog::{Gene, GenesExt};
use crate::chromosome::{Chromosome, GeneMap};
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How genes are exchanged when a crossing-over happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverModel {
    /// Every gene picks its strand independently, ignoring loci
    #[default]
    Independent,
    /// A single cut point along the loci; genes on the same side stay together
    Linked,
}

impl CrossoverModel {
    pub fn meiosis<R: Rng + ?Sized>(
        &self,
        chr1: &Chromosome,
        chr2: &Chromosome,
        recombination_rate: f64,
        genes: &[Gene],
        rng: &mut R,
    ) -> Chromosome {
        match self {
            Self::Independent => simulate_meiosis(chr1, chr2, recombination_rate, rng),
            Self::Linked => simulate_linked_meiosis(chr1, chr2, recombination_rate, genes, rng),
        }
    }
}

fn crossing_over<R: Rng + ?Sized>(recombination_rate: f64, rng: &mut R) -> bool {
    rng.random::<f64>() < recombination_rate / 100.0
}

fn gamete<R: Rng + ?Sized>(genes: GeneMap, color: &str, rng: &mut R) -> Chromosome {
    let id = format!("gamete-{:08x}", rng.random::<u32>());
    Chromosome::new(&id, genes, rng.random_bool(0.5), color)
}

/// Produces one gamete from a pair of homologous chromosomes
///
/// With probability `recombination_rate / 100` every gene independently
/// takes the allele of `chr1` or `chr2`. Otherwise one chromosome is
/// inherited whole.
pub fn simulate_meiosis<R: Rng + ?Sized>(
    chr1: &Chromosome,
    chr2: &Chromosome,
    recombination_rate: f64,
    rng: &mut R,
) -> Chromosome {
    if crossing_over(recombination_rate, rng) {
        let genes = chr1
            .genes()
            .iter()
            .map(|(gene_id, symbol)| {
                let symbol = match chr2.allele(gene_id) {
                    Some(other) if rng.random_bool(0.5) => other,
                    _ => *symbol,
                };
                (gene_id.clone(), symbol)
            })
            .collect();
        trace!("independent crossing-over between {} and {}", chr1.id(), chr2.id());
        gamete(genes, chr1.color(), rng)
    } else {
        let source = if rng.random_bool(0.5) { chr1 } else { chr2 };
        gamete(source.genes().clone(), source.color(), rng)
    }
}

/// Like `simulate_meiosis` but a crossing-over cuts the chromosome once
///
/// The cut point is drawn uniformly between the smallest and largest locus
/// of the genes present. Genes at or before the cut come from one strand,
/// the rest from the other. Genes missing from `genes` stay with the first
/// strand.
pub fn simulate_linked_meiosis<R: Rng + ?Sized>(
    chr1: &Chromosome,
    chr2: &Chromosome,
    recombination_rate: f64,
    genes: &[Gene],
    rng: &mut R,
) -> Chromosome {
    if !crossing_over(recombination_rate, rng) {
        let source = if rng.random_bool(0.5) { chr1 } else { chr2 };
        return gamete(source.genes().clone(), source.color(), rng);
    }

    let (first, second) = if rng.random_bool(0.5) {
        (chr1, chr2)
    } else {
        (chr2, chr1)
    };

    let loci: Vec<f32> = first
        .genes()
        .keys()
        .filter_map(|id| genes.gene(id).map(|g| g.locus()))
        .collect();
    let min = loci.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = loci.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let cut = if loci.is_empty() || min >= max {
        max
    } else {
        rng.random_range(min..max)
    };
    trace!("linked crossing-over at locus {} between {} and {}", cut, first.id(), second.id());

    let genes = first
        .genes()
        .iter()
        .map(|(gene_id, symbol)| {
            let after_cut = genes.gene(gene_id).map_or(false, |g| g.locus() > cut);
            let symbol = match second.allele(gene_id) {
                Some(other) if after_cut => other,
                _ => *symbol,
            };
            (gene_id.clone(), symbol)
        })
        .collect();
    gamete(genes, first.color(), rng)
}
