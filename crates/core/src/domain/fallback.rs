use crate::domain::market::{Headline, Lang};
use crate::domain::pick::{Country, Pick};

const FALLBACK_SCORE: f64 = 50.0;

/// Static pick set used when every fetch tier fails. Keeps all three
/// dashboard sections populated (5 US, 5 KR, 5 ETF).
pub fn fallback_picks() -> Vec<Pick> {
    const ENTRIES: [(&str, &str, Country); 15] = [
        ("AAPL", "Apple Inc.", Country::US),
        ("TSLA", "Tesla, Inc.", Country::US),
        ("NVDA", "NVIDIA Corp.", Country::US),
        ("MSFT", "Microsoft Corp.", Country::US),
        ("AMZN", "Amazon.com, Inc.", Country::US),
        ("005930.KS", "Samsung Electronics", Country::KR),
        ("000660.KS", "SK hynix", Country::KR),
        ("035420.KS", "NAVER Corp.", Country::KR),
        ("051910.KS", "LG Chem", Country::KR),
        ("207940.KS", "Samsung Biologics", Country::KR),
        ("SPY", "SPDR S&P 500 ETF", Country::ETF),
        ("QQQ", "Invesco QQQ Trust", Country::ETF),
        ("VTI", "Vanguard Total Stock Market ETF", Country::ETF),
        ("IWM", "iShares Russell 2000 ETF", Country::ETF),
        ("ARKK", "ARK Innovation ETF", Country::ETF),
    ];

    ENTRIES
        .iter()
        .map(|(ticker, name, country)| Pick {
            ticker: (*ticker).to_string(),
            name: (*name).to_string(),
            country: *country,
            score: FALLBACK_SCORE,
            rec: None,
        })
        .collect()
}

/// Static headlines per language. Only ko/en sets exist; other languages get
/// the English set.
pub fn fallback_headlines(lang: Lang) -> Vec<Headline> {
    let entries: &[(&str, &str)] = match lang {
        Lang::Ko => &[
            ("미국 증시, 기술주 강세 지속", "https://finance.naver.com/news/"),
            ("반도체 업황 회복 기대감", "https://finance.naver.com/news/"),
        ],
        _ => &[
            (
                "U.S. tech leads gains as Nasdaq closes higher",
                "https://finance.yahoo.com",
            ),
            (
                "Chip recovery optimism grows among investors",
                "https://finance.yahoo.com",
            ),
        ],
    };

    entries
        .iter()
        .map(|(title, link)| Headline {
            title: (*title).to_string(),
            link: (*link).to_string(),
            publisher: None,
        })
        .collect()
}
