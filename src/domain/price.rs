//! Price windows (contiguous segments of one pair's price series).

use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: Option<NaiveDateTime>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(price: f64) -> Self {
        PricePoint {
            timestamp: None,
            price,
        }
    }
}

/// One pre-segmented window of a price series, ordered by time.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceWindow {
    pub index: usize,
    pub points: Vec<PricePoint>,
}

impl PriceWindow {
    pub fn new(index: usize, points: Vec<PricePoint>) -> Self {
        PriceWindow { index, points }
    }

    pub fn from_prices(index: usize, prices: &[f64]) -> Self {
        PriceWindow {
            index,
            points: prices.iter().map(|&p| PricePoint::new(p)).collect(),
        }
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn first_price(&self) -> Option<f64> {
        self.points.first().map(|p| p.price)
    }

    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
