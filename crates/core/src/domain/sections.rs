use crate::domain::pick::{Country, Pick};

/// Dashboard section membership. Splitting preserves pick order within each
/// section (the backend ranks picks, so order is meaningful).
#[derive(Debug, Clone, Default)]
pub struct Sections {
    pub us: Vec<Pick>,
    pub kr: Vec<Pick>,
    pub etf: Vec<Pick>,
}

impl Sections {
    pub fn split(items: &[Pick], max_per_section: usize) -> Self {
        let take = |country: Country| -> Vec<Pick> {
            items
                .iter()
                .filter(|p| p.country == country)
                .take(max_per_section)
                .cloned()
                .collect()
        };

        Self {
            us: take(Country::US),
            kr: take(Country::KR),
            etf: take(Country::ETF),
        }
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (self.us.len(), self.kr.len(), self.etf.len())
    }

    pub fn total(&self) -> usize {
        self.us.len() + self.kr.len() + self.etf.len()
    }

    pub fn is_fully_formed(&self) -> bool {
        !self.us.is_empty() && !self.kr.is_empty() && !self.etf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(ticker: &str, country: Country) -> Pick {
        Pick {
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            country,
            score: 50.0,
            rec: None,
        }
    }

    #[test]
    fn split_caps_each_section() {
        let items = vec![
            pick("A", Country::US),
            pick("B", Country::US),
            pick("C", Country::US),
            pick("005930.KS", Country::KR),
            pick("SPY", Country::ETF),
        ];

        let sections = Sections::split(&items, 2);
        assert_eq!(sections.counts(), (2, 1, 1));
        assert_eq!(sections.us[0].ticker, "A");
        assert_eq!(sections.us[1].ticker, "B");
    }

    #[test]
    fn missing_section_is_not_fully_formed() {
        let items = vec![pick("A", Country::US)];
        let sections = Sections::split(&items, 5);
        assert!(!sections.is_fully_formed());
        assert_eq!(sections.total(), 1);
    }
}
