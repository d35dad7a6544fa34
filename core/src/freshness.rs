use std::fmt;

/// Freshness bucket derived from a card's days-remaining value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Expired,
    Critical,
    Warning,
    Fresh,
    /// Extended-variant bucket for stock more than 30 days out.
    LongLife,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Expired => "Expired",
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Fresh => "Fresh",
            Self::LongLife => "Long life",
        };
        f.write_str(s)
    }
}

/// Classification result: the bucket plus the display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Freshness {
    pub bucket: Bucket,
    pub label: String,
}

/// Pure, total over all day counts. Thresholds: <= 0 expired, <= 2
/// critical, <= 4 warning, otherwise fresh.
#[must_use]
pub fn classify(days: i64) -> Freshness {
    let bucket = if days <= 0 {
        Bucket::Expired
    } else if days <= 2 {
        Bucket::Critical
    } else if days <= 4 {
        Bucket::Warning
    } else {
        Bucket::Fresh
    };
    Freshness {
        bucket,
        label: day_label(days),
    }
}

/// Like [`classify`], but maps anything more than 30 days out to the
/// extended-variant `LongLife` bucket.
#[must_use]
pub fn classify_extended(days: i64) -> Freshness {
    let mut freshness = classify(days);
    if days > 30 {
        freshness.bucket = Bucket::LongLife;
    }
    freshness
}

fn day_label(days: i64) -> String {
    if days <= 0 {
        "Expired".to_string()
    } else if days == 1 {
        "1 day left".to_string()
    } else {
        format!("{days} days left")
    }
}
