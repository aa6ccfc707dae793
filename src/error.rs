use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneticsError {
    #[error("gene {0} has no alleles")]
    EmptyGene(String),
    #[error("gene {gene} defines allele {symbol} more than once")]
    DuplicateAllele { gene: String, symbol: char },
    #[error("unknown gene: {0}")]
    UnknownGene(String),
    #[error("allele {symbol} is not defined for gene {gene}")]
    UnknownAllele { gene: String, symbol: char },
    #[error("{parent} has no allele assignment for gene {gene}")]
    MissingAssignment { parent: &'static str, gene: String },
    #[error("{name} must be a percentage between 0 and 100, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("{observed} observed categories but {expected} expected ratio parts")]
    RatioMismatch { observed: usize, expected: usize },
    #[error("expected ratio parts must be positive")]
    InvalidRatio,
    #[error("no observations to test")]
    EmptySample,
    #[error("no critical values for {0} degrees of freedom")]
    UnsupportedDegreesOfFreedom(usize),
    #[error("not enough data: {0}")]
    InsufficientData(&'static str),
    #[error("invalid catalog row {row}: {reason}")]
    InvalidCatalogRow { row: usize, reason: String },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse experiment config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeneticsError>;
