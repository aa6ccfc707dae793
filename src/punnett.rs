use crate::catalog::Gene;
use crate::chromosome::Diploid;
use crate::error::{GeneticsError, Result};
use crate::phenotype::{format_genotype, resolve_phenotype};

/// The four equally likely genotypes of a single-gene cross
pub struct PunnettSquare {
    gene_id: String,
    mother_gametes: [char; 2],
    father_gametes: [char; 2],
    /// `cells[i][j]` holds (genotype, phenotype) for mother gamete `i` and father gamete `j`
    cells: [[(String, String); 2]; 2],
}

impl PunnettSquare {
    pub fn new<M, F>(gene: &Gene, mother: &M, father: &F) -> Result<Self>
    where
        M: Diploid + ?Sized,
        F: Diploid + ?Sized,
    {
        let gametes = |parent: (Option<char>, Option<char>), label: &'static str| match parent {
            (Some(a), Some(b)) => Ok([a, b]),
            _ => Err(GeneticsError::MissingAssignment {
                parent: label,
                gene: gene.id().to_string(),
            }),
        };
        let mother_gametes = gametes(mother.alleles(gene.id()), "mother")?;
        let father_gametes = gametes(father.alleles(gene.id()), "father")?;

        let cell = |m: char, f: char| {
            (
                format_genotype(Some(m), Some(f)),
                resolve_phenotype(gene, Some(m), Some(f)),
            )
        };
        let [m0, m1] = mother_gametes;
        let [f0, f1] = father_gametes;
        let cells = [[cell(m0, f0), cell(m0, f1)], [cell(m1, f0), cell(m1, f1)]];

        Ok(Self {
            gene_id: gene.id().to_string(),
            mother_gametes,
            father_gametes,
            cells,
        })
    }

    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    pub fn mother_gametes(&self) -> [char; 2] {
        self.mother_gametes
    }

    pub fn father_gametes(&self) -> [char; 2] {
        self.father_gametes
    }

    pub fn cell(&self, mother: usize, father: usize) -> &(String, String) {
        &self.cells[mother][father]
    }

    fn tally<'a, P>(&'a self, pick: P) -> Vec<(String, usize)>
    where
        P: Fn(&'a (String, String)) -> &'a String,
    {
        let mut counts: Vec<(String, usize)> = vec![];
        for cell in self.cells.iter().flatten() {
            let key = pick(cell);
            match counts.iter_mut().find(|(k, _)| k == key) {
                Some((_, n)) => *n += 1,
                None => counts.push((key.clone(), 1)),
            }
        }
        counts
    }

    /// Genotype counts out of four, in genotype order (`YY`, `Yy`, `yy`)
    pub fn genotype_ratio(&self) -> Vec<(String, usize)> {
        let mut counts = self.tally(|c| &c.0);
        let recessive = |g: &str| g.chars().map(|c| !c.is_uppercase()).collect::<Vec<_>>();
        counts.sort_by(|a, b| recessive(&a.0).cmp(&recessive(&b.0)).then(a.0.cmp(&b.0)));
        counts
    }

    /// Phenotype counts out of four, most frequent first
    pub fn phenotype_ratio(&self) -> Vec<(String, usize)> {
        let mut counts = self.tally(|c| &c.1);
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Formats counts as a reduced ratio, e.g. `[3, 1]` as `3:1` and `[1, 2, 1]` as `1:2:1`
pub fn ratio_label(counts: &[usize]) -> String {
    let divisor = counts.iter().copied().fold(0, gcd).max(1);
    counts
        .iter()
        .map(|c| (c / divisor).to_string())
        .collect::<Vec<_>>()
        .join(":")
}
