//! Claim records before and after accumulation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product line a claim belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    /// Comprehensive cover
    Comp,
    /// Non-comprehensive cover
    NonComp,
}

impl ProductType {
    pub const ALL: [ProductType; 2] = [ProductType::Comp, ProductType::NonComp];

    /// Label used in claim files and triangle output
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::Comp => "Comp",
            ProductType::NonComp => "Non-Comp",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            ProductType::Comp => "Comp",
            ProductType::NonComp => "NonComp",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Unrecognised product label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProductType(pub String);

impl fmt::Display for UnknownProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown product type: {}", self.0)
    }
}

impl std::error::Error for UnknownProductType {}

impl FromStr for ProductType {
    type Err = UnknownProductType;

    /// Exact variant name first ("NonComp"), then display name ignoring case ("non-comp")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if let Some(product) = Self::ALL.iter().find(|p| p.variant_name() == label) {
            return Ok(*product);
        }
        Self::ALL
            .iter()
            .find(|p| p.display_name().eq_ignore_ascii_case(label))
            .copied()
            .ok_or_else(|| UnknownProductType(label.to_string()))
    }
}

/// One incremental claim observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub product_type: ProductType,

    /// Year the lineage starts
    pub origin_year: i32,

    /// Year the amount was observed, never before `origin_year`
    pub development_year: i32,

    /// Incremental amount; `None` when the source left the field blank
    pub value: Option<f64>,
}

impl Claim {
    pub fn new(product_type: ProductType, origin_year: i32, development_year: i32, value: f64) -> Self {
        Self {
            product_type,
            origin_year,
            development_year,
            value: Some(value),
        }
    }

    /// Claim with no reported amount
    pub fn blank(product_type: ProductType, origin_year: i32, development_year: i32) -> Self {
        Self {
            product_type,
            origin_year,
            development_year,
            value: None,
        }
    }

    /// Development lag in years (0 on the first diagonal, negative if malformed)
    pub fn lag(&self) -> i64 {
        i64::from(self.development_year) - i64::from(self.origin_year)
    }
}

/// Whether a cumulative cell came from input or was carried forward over a gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellOrigin {
    Observed,
    Filled,
}

/// Cumulative total through `development_year` for one lineage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeClaim {
    pub product_type: ProductType,
    pub origin_year: i32,
    pub development_year: i32,
    pub value: f64,
    pub origin: CellOrigin,
}

impl CumulativeClaim {
    pub fn observed(product_type: ProductType, origin_year: i32, development_year: i32, value: f64) -> Self {
        Self {
            product_type,
            origin_year,
            development_year,
            value,
            origin: CellOrigin::Observed,
        }
    }

    /// Copy of `prior` moved to `development_year`
    pub fn carried_forward(prior: &CumulativeClaim, development_year: i32) -> Self {
        Self {
            product_type: prior.product_type,
            origin_year: prior.origin_year,
            development_year,
            value: prior.value,
            origin: CellOrigin::Filled,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self.origin, CellOrigin::Filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_parsing() {
        assert_eq!("Comp".parse::<ProductType>(), Ok(ProductType::Comp));
        assert_eq!("NonComp".parse::<ProductType>(), Ok(ProductType::NonComp));
        assert_eq!("Non-Comp".parse::<ProductType>(), Ok(ProductType::NonComp));
        assert_eq!("non-comp".parse::<ProductType>(), Ok(ProductType::NonComp));
        assert_eq!(" COMP ".parse::<ProductType>(), Ok(ProductType::Comp));
        assert_eq!(
            "Motor".parse::<ProductType>(),
            Err(UnknownProductType("Motor".to_string()))
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ProductType::Comp.to_string(), "Comp");
        assert_eq!(ProductType::NonComp.to_string(), "Non-Comp");
        assert!(ProductType::Comp < ProductType::NonComp);
    }

    #[test]
    fn test_carried_forward_cell() {
        let prior = CumulativeClaim::observed(ProductType::Comp, 2000, 2000, 5.0);
        let filled = CumulativeClaim::carried_forward(&prior, 2002);

        assert_eq!(filled.development_year, 2002);
        assert_eq!(filled.origin_year, 2000);
        assert_eq!(filled.value, 5.0);
        assert!(filled.is_filled());
        assert!(!prior.is_filled());
    }

    #[test]
    fn test_claim_lag() {
        assert_eq!(Claim::new(ProductType::Comp, 1990, 1993, 1.0).lag(), 3);
        assert_eq!(Claim::blank(ProductType::NonComp, 1990, 1990).lag(), 0);
        assert_eq!(Claim::new(ProductType::Comp, 1990, 1989, 1.0).lag(), -1);
        assert_eq!(
            Claim::new(ProductType::Comp, i32::MIN, i32::MAX, 1.0).lag(),
            i64::from(u32::MAX)
        );
    }
}
