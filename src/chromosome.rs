use std::collections::BTreeMap;

/// Gene id to allele symbol, one allele per gene
pub type GeneMap = BTreeMap<String, char>;

/// A haploid set of alleles
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    id: String,
    genes: GeneMap,
    is_paternal: bool,
    color: String,
}

impl Chromosome {
    pub fn new(id: &str, genes: GeneMap, is_paternal: bool, color: &str) -> Self {
        Self {
            id: id.into(),
            genes,
            is_paternal,
            color: color.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn genes(&self) -> &GeneMap {
        &self.genes
    }

    /// Cosmetic parentage flag; nothing biological depends on it
    pub fn is_paternal(&self) -> bool {
        self.is_paternal
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn allele(&self, gene_id: &str) -> Option<char> {
        self.genes.get(gene_id).copied()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_allele(mut self, gene_id: &str, symbol: char) -> Self {
        self.genes.insert(gene_id.into(), symbol);
        self
    }
}

/// Anything carrying a maternal and a paternal chromosome
pub trait Diploid {
    fn maternal(&self) -> &Chromosome;
    fn paternal(&self) -> &Chromosome;

    /// Maternal and paternal allele symbols for a gene
    fn alleles(&self, gene_id: &str) -> (Option<char>, Option<char>) {
        (
            self.maternal().allele(gene_id),
            self.paternal().allele(gene_id),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    maternal: Chromosome,
    paternal: Chromosome,
}

impl Individual {
    pub fn new(maternal: Chromosome, paternal: Chromosome) -> Self {
        Self { maternal, paternal }
    }
}

impl Diploid for Individual {
    fn maternal(&self) -> &Chromosome {
        &self.maternal
    }

    fn paternal(&self) -> &Chromosome {
        &self.paternal
    }
}
