//! Simple moving average.
//!
//! SMA(n)[i] = sum(P[i-j] for j in 0..n) / n
//! Warmup: first (n-1) values are invalid (`None`).

pub fn simple_moving_average(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut values = Vec::with_capacity(prices.len());
    if period == 0 {
        values.resize(prices.len(), None);
        return values;
    }

    let warmup = period - 1;
    for i in 0..prices.len() {
        let value = if i >= warmup {
            let start = i + 1 - period;
            Some(prices[start..=i].iter().sum::<f64>() / period as f64)
        } else {
            None
        };
        values.push(value);
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_warmup() {
        let sma = simple_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(sma.len(), 5);
        assert!(sma[0].is_none());
        assert!(sma[1].is_none());
        assert!(sma[2].is_some());
    }

    #[test]
    fn sma_values() {
        let sma = simple_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_relative_eq!(sma[2].unwrap(), 2.0);
        assert_relative_eq!(sma[3].unwrap(), 3.0);
        assert_relative_eq!(sma[4].unwrap(), 4.0);
    }

    #[test]
    fn sma_period_one_is_identity() {
        let prices = [1.5, 0.5, 2.5];
        let sma = simple_moving_average(&prices, 1);
        for (value, price) in sma.iter().zip(prices.iter()) {
            assert_eq!(value.unwrap(), *price);
        }
    }

    #[test]
    fn sma_longer_than_series() {
        let sma = simple_moving_average(&[1.0, 2.0], 5);
        assert!(sma.iter().all(Option::is_none));
    }

    #[test]
    fn sma_zero_period_is_all_invalid() {
        let sma = simple_moving_average(&[1.0, 2.0], 0);
        assert_eq!(sma, vec![None, None]);
    }
}
