use crate::catalog::{Allele, Gene};
use crate::chromosome::Diploid;
use std::cmp::Ordering;

/// Phenotype reported when an allele cannot be looked up
pub const UNKNOWN_PHENOTYPE: &str = "Desconhecido";

/// Placeholder for a missing symbol in a genotype string
pub const UNKNOWN_SYMBOL: char = '?';

/// The allele whose trait shows for a pair of symbols
///
/// The maternal allele wins when dominant, then the paternal one. When
/// neither is dominant the maternal allele shows.
pub fn expressed_allele(
    gene: &Gene,
    maternal: Option<char>,
    paternal: Option<char>,
) -> Option<&Allele> {
    let maternal = gene.allele(maternal?)?;
    let paternal = gene.allele(paternal?)?;
    if maternal.is_dominant {
        Some(maternal)
    } else if paternal.is_dominant {
        Some(paternal)
    } else {
        Some(maternal)
    }
}

pub fn resolve_phenotype(gene: &Gene, maternal: Option<char>, paternal: Option<char>) -> String {
    expressed_allele(gene, maternal, paternal)
        .map_or_else(|| UNKNOWN_PHENOTYPE.to_string(), |a| a.name.clone())
}

pub fn calculate_phenotype<D: Diploid + ?Sized>(gene: &Gene, individual: &D) -> String {
    let (maternal, paternal) = individual.alleles(gene.id());
    resolve_phenotype(gene, maternal, paternal)
}

/// Uppercase symbols sort before lowercase ones, then lexical order
fn genotype_order(a: &char, b: &char) -> Ordering {
    match (a.is_uppercase(), b.is_uppercase()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

pub fn format_genotype(maternal: Option<char>, paternal: Option<char>) -> String {
    let mut pair = [
        maternal.unwrap_or(UNKNOWN_SYMBOL),
        paternal.unwrap_or(UNKNOWN_SYMBOL),
    ];
    pair.sort_by(genotype_order);
    pair.iter().collect()
}

pub fn get_genotype<D: Diploid + ?Sized>(gene: &Gene, individual: &D) -> String {
    let (maternal, paternal) = individual.alleles(gene.id());
    format_genotype(maternal, paternal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{pea_catalog, GenesExt};
    use crate::chromosome::{Chromosome, GeneMap, Individual};
    use std::error::Error;

    fn individual(gene_id: &str, maternal: char, paternal: char) -> Individual {
        Individual::new(
            Chromosome::new("m", GeneMap::new(), false, "#f00").with_allele(gene_id, maternal),
            Chromosome::new("p", GeneMap::new(), true, "#00f").with_allele(gene_id, paternal),
        )
    }

    #[test]
    fn test_dominant_allele_shows_from_either_parent() {
        let catalog = pea_catalog();
        let gene = catalog.gene("seed-color").unwrap();
        assert_eq!(calculate_phenotype(gene, &individual("seed-color", 'Y', 'y')), "Yellow");
        assert_eq!(calculate_phenotype(gene, &individual("seed-color", 'y', 'Y')), "Yellow");
        assert_eq!(calculate_phenotype(gene, &individual("seed-color", 'Y', 'Y')), "Yellow");
        assert_eq!(calculate_phenotype(gene, &individual("seed-color", 'y', 'y')), "Green");
    }

    #[test]
    fn test_maternal_wins_ties() -> Result<(), Box<dyn Error>> {
        let gene = Gene::new(
            "coat",
            "Coat",
            0.0,
            vec![
                Allele::dominant('B', "Black", "#000"),
                Allele::dominant('W', "White", "#fff"),
                Allele::recessive('g', "Grey", "#888"),
                Allele::recessive('s', "Silver", "#ccc"),
            ],
        )?;
        assert_eq!(calculate_phenotype(&gene, &individual("coat", 'W', 'B')), "White");
        assert_eq!(calculate_phenotype(&gene, &individual("coat", 's', 'g')), "Silver");
        Ok(())
    }

    #[test]
    fn test_unknown_alleles_degrade_to_sentinel() {
        let catalog = pea_catalog();
        let gene = catalog.gene("seed-color").unwrap();
        let stray = individual("seed-color", 'Y', 'q');
        assert_eq!(calculate_phenotype(gene, &stray), UNKNOWN_PHENOTYPE);
        let elsewhere = individual("seed-shape", 'R', 'r');
        assert_eq!(calculate_phenotype(gene, &elsewhere), UNKNOWN_PHENOTYPE);
    }

    #[test]
    fn test_genotype_puts_uppercase_first() {
        let catalog = pea_catalog();
        let gene = catalog.gene("seed-color").unwrap();
        assert_eq!(get_genotype(gene, &individual("seed-color", 'y', 'Y')), "Yy");
        assert_eq!(get_genotype(gene, &individual("seed-color", 'Y', 'y')), "Yy");
        assert_eq!(get_genotype(gene, &individual("seed-color", 'y', 'y')), "yy");
        assert_eq!(get_genotype(gene, &individual("seed-color", 'Y', 'Y')), "YY");
    }

    #[test]
    fn test_genotype_falls_back_to_lexical_order() {
        assert_eq!(format_genotype(Some('b'), Some('a')), "ab");
        assert_eq!(format_genotype(Some('B'), Some('A')), "AB");
    }

    #[test]
    fn test_genotype_marks_missing_symbols() {
        let catalog = pea_catalog();
        let gene = catalog.gene("seed-shape").unwrap();
        let genotype = get_genotype(gene, &individual("seed-color", 'Y', 'y'));
        assert_eq!(genotype, "??");
        assert_eq!(format_genotype(Some('y'), None).chars().count(), 2);
    }
}
