//! Development triangle structures

use serde::{Deserialize, Serialize};

use crate::claims::ProductType;

/// Period window of a triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleHeader {
    /// Earliest origin year across all products
    pub min_origin_year: i32,

    /// Latest development year - earliest origin year + 1
    pub development_years: i32,
}

impl TriangleHeader {
    /// `None` when the span does not fit in an `i32`
    pub fn from_bounds(min_origin_year: i32, max_development_year: i32) -> Option<Self> {
        let development_years = max_development_year
            .checked_sub(min_origin_year)?
            .checked_add(1)?;
        Some(Self {
            min_origin_year,
            development_years,
        })
    }

    pub fn max_development_year(&self) -> i32 {
        self.min_origin_year
            .saturating_add(self.development_years.saturating_sub(1))
    }
}

/// (origin year, development year) cell coordinate; orders by origin year first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodPair {
    pub origin_year: i32,
    pub development_year: i32,
}

impl PeriodPair {
    pub fn new(origin_year: i32, development_year: i32) -> Self {
        Self {
            origin_year,
            development_year,
        }
    }
}

/// Cumulative values of one product type, aligned to `Triangle::periods`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub product_type: ProductType,
    pub values: Vec<f64>,
}

/// Cumulative development triangle for all product types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub header: TriangleHeader,

    /// Distinct cell coordinates present in the data, in series order
    pub periods: Vec<PeriodPair>,

    /// One series per product type present, in `ProductType` order
    pub series: Vec<CategorySeries>,
}

impl Triangle {
    pub fn series_for(&self, product_type: ProductType) -> Option<&CategorySeries> {
        self.series.iter().find(|s| s.product_type == product_type)
    }

    /// Value of one cell; `None` if the product or coordinate is not in the triangle
    pub fn value_at(&self, product_type: ProductType, origin_year: i32, development_year: i32) -> Option<f64> {
        let index = self
            .periods
            .binary_search(&PeriodPair::new(origin_year, development_year))
            .ok()?;
        self.series_for(product_type).map(|s| s.values[index])
    }

    pub fn product_types(&self) -> Vec<ProductType> {
        self.series.iter().map(|s| s.product_type).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Triangle {
        Triangle {
            header: TriangleHeader::from_bounds(1990, 1991).unwrap(),
            periods: vec![
                PeriodPair::new(1990, 1990),
                PeriodPair::new(1990, 1991),
                PeriodPair::new(1991, 1991),
            ],
            series: vec![
                CategorySeries {
                    product_type: ProductType::Comp,
                    values: vec![1.0, 3.0, 0.0],
                },
                CategorySeries {
                    product_type: ProductType::NonComp,
                    values: vec![0.0, 0.0, 7.5],
                },
            ],
        }
    }

    #[test]
    fn test_header_bounds() {
        let header = TriangleHeader::from_bounds(2000, 2002).unwrap();
        assert_eq!(header.development_years, 3);
        assert_eq!(header.max_development_year(), 2002);
    }

    #[test]
    fn test_header_span_out_of_range() {
        assert_eq!(TriangleHeader::from_bounds(i32::MIN, i32::MAX), None);
        assert_eq!(TriangleHeader::from_bounds(-1, i32::MAX), None);

        let widest = TriangleHeader::from_bounds(0, i32::MAX - 1).unwrap();
        assert_eq!(widest.development_years, i32::MAX);
        assert_eq!(widest.max_development_year(), i32::MAX - 1);

        let top = TriangleHeader::from_bounds(i32::MAX, i32::MAX).unwrap();
        assert_eq!(top.development_years, 1);
        assert_eq!(top.max_development_year(), i32::MAX);
    }

    #[test]
    fn test_period_pair_ordering() {
        let mut pairs = vec![
            PeriodPair::new(1991, 1991),
            PeriodPair::new(1990, 1992),
            PeriodPair::new(1990, 1990),
        ];
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                PeriodPair::new(1990, 1990),
                PeriodPair::new(1990, 1992),
                PeriodPair::new(1991, 1991),
            ]
        );
    }

    #[test]
    fn test_cell_lookup() {
        let triangle = sample();
        assert_eq!(triangle.value_at(ProductType::Comp, 1990, 1991), Some(3.0));
        assert_eq!(triangle.value_at(ProductType::NonComp, 1991, 1991), Some(7.5));
        assert_eq!(triangle.value_at(ProductType::Comp, 1989, 1991), None);
        assert_eq!(triangle.product_types(), vec![ProductType::Comp, ProductType::NonComp]);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["header"]["min_origin_year"], 1990);
        assert_eq!(json["header"]["development_years"], 2);
        assert_eq!(json["series"][1]["product_type"], "NonComp");
        assert_eq!(json["series"][1]["values"][2], 7.5);

        let back: Triangle = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }
}
