use crate::catalog::Gene;
use crate::chromosome::Diploid;
use crate::experiment::Offspring;
use ndarray::{s, Array, Array1, Array2, Axis, Zip};

pub type AlleleCount = u32;

/// Individuals by alleles count matrix
///
/// Columns are grouped by locus; `loci` holds the `(start, end)` column
/// range of each gene and `columns` the `(gene id, symbol)` of each column.
pub struct AlleleMatrix {
    pub(crate) data: Array2<AlleleCount>,
    pub(crate) loci: Vec<(usize, usize)>,
    columns: Vec<(String, char)>,
}

impl AlleleMatrix {
    pub fn new() -> Self {
        Self {
            data: Array2::<AlleleCount>::zeros((0, 0)),
            loci: vec![],
            columns: vec![],
        }
    }

    /// Counts the alleles every offspring carries for each of `genes`
    ///
    /// A gene's columns are its catalog alleles followed by any other symbol
    /// observed at that gene, in sorted order.
    pub fn from_offspring(offspring: &[Offspring], genes: &[Gene]) -> Self {
        let mut columns = vec![];
        let mut loci = vec![];
        for gene in genes {
            let start = columns.len();
            let mut symbols: Vec<char> = gene.alleles().iter().map(|a| a.symbol).collect();
            let mut extra: Vec<char> = offspring
                .iter()
                .flat_map(|o| {
                    let (m, p) = o.alleles(gene.id());
                    m.into_iter().chain(p)
                })
                .filter(|s| !gene.has_allele(*s))
                .collect();
            extra.sort_unstable();
            extra.dedup();
            symbols.extend(extra);
            columns.extend(symbols.into_iter().map(|s| (gene.id().to_string(), s)));
            loci.push((start, columns.len()));
        }

        let mut data = Array2::<AlleleCount>::zeros((offspring.len(), columns.len()));
        for (mut row, child) in data.rows_mut().into_iter().zip(offspring) {
            for (gene, (start, end)) in genes.iter().zip(&loci) {
                let (m, p) = child.alleles(gene.id());
                for symbol in m.into_iter().chain(p) {
                    let column = columns[*start..*end].iter().position(|(_, s)| *s == symbol);
                    if let Some(offset) = column {
                        row[start + offset] += 1;
                    }
                }
            }
        }

        Self { data, loci, columns }
    }

    pub fn individuals(&self) -> usize {
        self.data.nrows()
    }

    pub fn loci(&self) -> &[(usize, usize)] {
        &self.loci
    }

    /// Total count of each allele of a locus across all individuals
    pub fn allele_counts(&self, locus: usize) -> Vec<(char, AlleleCount)> {
        let (start, end) = self.loci[locus];
        let totals: Array1<AlleleCount> = self.data.slice(s![.., start..end]).sum_axis(Axis(0));
        self.columns[start..end]
            .iter()
            .zip(totals.iter())
            .map(|((_, symbol), count)| (*symbol, *count))
            .collect()
    }

    /// Computes the frequency matrix from allele counts
    ///
    /// Every row is normalised per locus so the alleles of one locus sum to
    /// one. A locus where an individual carries nothing stays at zero.
    pub fn frequency(&self) -> Array2<f64> {
        let mut freqs = Array2::from_elem(self.data.dim(), 0.0);

        Zip::from(freqs.rows_mut())
            .and(self.data.rows())
            .for_each(|mut freqs, row| {
                let x = Array::from(
                    self.loci
                        .iter()
                        .flat_map(|(start, end)| {
                            let locus = row.slice(s![*start..*end]);
                            let locus_sum = locus.sum() as f64;
                            locus
                                .iter()
                                .map(|x| if locus_sum > 0.0 { *x as f64 / locus_sum } else { 0.0 })
                                .collect::<Vec<_>>()
                        })
                        .collect::<Vec<_>>(),
                );
                freqs.assign(&x);
            });
        freqs
    }
}

impl Default for AlleleMatrix {
    fn default() -> Self {
        Self::new()
    }
}
