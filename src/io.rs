use crate::catalog::{Allele, Gene};
use crate::error::{GeneticsError, Result};
use crate::experiment::Offspring;
use crate::phenotype::{calculate_phenotype, get_genotype};
use serde::Deserialize;
use std::io::{Read, Write};

#[derive(Debug, Deserialize)]
struct CatalogRow {
    gene_id: String,
    gene_name: String,
    locus: f32,
    symbol: String,
    allele_name: String,
    color: String,
    dominant: String,
}

fn parse_dominant(field: &str) -> Option<bool> {
    match field.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "dominant" => Some(true),
        "false" | "no" | "n" | "0" | "recessive" => Some(false),
        _ => None,
    }
}

/// Reads a gene catalog from delimited text
///
/// One row per allele:
/// `gene_id,gene_name,locus,symbol,allele_name,color,dominant`.
/// Rows of a gene need not be adjacent; genes keep the order in which
/// they first appear and take name and locus from that first row.
pub struct CatalogCsvBuilder {
    headers: bool,
    delimiter: u8,
}

impl CatalogCsvBuilder {
    /// Construct a new catalog reader builder
    pub fn new() -> Self {
        Self {
            headers: true,
            delimiter: b',',
        }
    }

    pub fn headers(&mut self, headers: bool) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Vec<Gene>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.headers)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut partial: Vec<(String, String, f32, Vec<Allele>)> = vec![];
        for (idx, record) in rdr.deserialize::<CatalogRow>().enumerate() {
            let row = record?;
            let invalid =
                |reason: String| GeneticsError::InvalidCatalogRow { row: idx + 1, reason };

            let mut chars = row.symbol.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(invalid(format!(
                        "symbol {:?} is not a single character",
                        row.symbol
                    )))
                }
            };
            let is_dominant = parse_dominant(&row.dominant)
                .ok_or_else(|| invalid(format!("dominance {:?} is not a boolean", row.dominant)))?;
            let allele = Allele::new(symbol, &row.allele_name, &row.color, is_dominant);

            match partial.iter_mut().find(|(id, ..)| *id == row.gene_id) {
                Some((.., alleles)) => alleles.push(allele),
                None => partial.push((row.gene_id, row.gene_name, row.locus, vec![allele])),
            }
        }

        partial
            .into_iter()
            .map(|(id, name, locus, alleles)| Gene::new(&id, &name, locus, alleles))
            .collect()
    }
}

impl Default for CatalogCsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes one row per offspring with a genotype and a phenotype column per gene
pub fn write_offspring<W: Write>(offspring: &[Offspring], genes: &[Gene], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["id".to_string(), "generation".to_string()];
    for gene in genes {
        header.push(format!("{}_genotype", gene.id()));
        header.push(format!("{}_phenotype", gene.id()));
    }
    wtr.write_record(&header)?;

    for child in offspring {
        let mut record = vec![child.id().to_string(), child.generation().to_string()];
        for gene in genes {
            record.push(get_genotype(gene, child));
            record.push(calculate_phenotype(gene, child));
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
