use crate::error::{GeneticsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One variant form of a `Gene`.
///
/// Dominance is asserted by whoever writes the catalog. The case of
/// `symbol` is only a naming convention and is never consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allele {
    pub symbol: char,
    pub name: String,
    pub color: String,
    pub is_dominant: bool,
}

impl Allele {
    pub fn new(symbol: char, name: &str, color: &str, is_dominant: bool) -> Self {
        Self {
            symbol,
            name: name.into(),
            color: color.into(),
            is_dominant,
        }
    }

    pub fn dominant(symbol: char, name: &str, color: &str) -> Self {
        Self::new(symbol, name, color, true)
    }

    pub fn recessive(symbol: char, name: &str, color: &str) -> Self {
        Self::new(symbol, name, color, false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeneFields")]
pub struct Gene {
    id: String,
    name: String,
    locus: f32,
    alleles: Vec<Allele>,
}

#[derive(Deserialize)]
struct GeneFields {
    id: String,
    name: String,
    locus: f32,
    alleles: Vec<Allele>,
}

impl TryFrom<GeneFields> for Gene {
    type Error = GeneticsError;

    fn try_from(fields: GeneFields) -> Result<Self> {
        Gene::new(&fields.id, &fields.name, fields.locus, fields.alleles)
    }
}

impl Gene {
    /// Constructs a `Gene`
    ///
    /// Fails when `alleles` is empty or when two alleles share a symbol.
    pub fn new(id: &str, name: &str, locus: f32, alleles: Vec<Allele>) -> Result<Self> {
        if alleles.is_empty() {
            return Err(GeneticsError::EmptyGene(id.into()));
        }
        let mut seen = HashSet::new();
        for allele in &alleles {
            if !seen.insert(allele.symbol) {
                return Err(GeneticsError::DuplicateAllele {
                    gene: id.into(),
                    symbol: allele.symbol,
                });
            }
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            locus,
            alleles,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position marker used to order genes along a chromosome
    pub fn locus(&self) -> f32 {
        self.locus
    }

    pub fn alleles(&self) -> &[Allele] {
        &self.alleles
    }

    pub fn allele(&self, symbol: char) -> Option<&Allele> {
        self.alleles.iter().find(|a| a.symbol == symbol)
    }

    pub fn has_allele(&self, symbol: char) -> bool {
        self.allele(symbol).is_some()
    }
}

pub trait GenesExt {
    fn gene(&self, id: &str) -> Option<&Gene>;
}

impl GenesExt for [Gene] {
    fn gene(&self, id: &str) -> Option<&Gene> {
        self.iter().find(|g| g.id == id)
    }
}

/// The traits Mendel followed in his pea plants
pub fn pea_catalog() -> Vec<Gene> {
    [
        (
            "seed-color",
            "Seed color",
            1.0,
            vec![
                Allele::dominant('Y', "Yellow", "#f4d03f"),
                Allele::recessive('y', "Green", "#58d68d"),
            ],
        ),
        (
            "seed-shape",
            "Seed shape",
            2.5,
            vec![
                Allele::dominant('R', "Round", "#c39bd3"),
                Allele::recessive('r', "Wrinkled", "#7d3c98"),
            ],
        ),
        (
            "flower-color",
            "Flower color",
            4.0,
            vec![
                Allele::dominant('P', "Purple", "#8e44ad"),
                Allele::recessive('p', "White", "#fdfefe"),
            ],
        ),
        (
            "plant-height",
            "Plant height",
            5.5,
            vec![
                Allele::dominant('T', "Tall", "#27ae60"),
                Allele::recessive('t', "Dwarf", "#a9dfbf"),
            ],
        ),
    ]
    .into_iter()
    .map(|(id, name, locus, alleles)| Gene::new(id, name, locus, alleles))
    .collect::<Result<_>>()
    .expect("pea catalog alleles are non-empty with distinct symbols")
}
