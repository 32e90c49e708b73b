use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use url::Host;

/// Generic, sponsored and infrastructure TLDs.
const GENERIC: &[&str] = &[
    "aero", "app", "arpa", "asia", "biz", "blog", "cat", "cloud", "club", "com", "coop", "design",
    "dev", "edu", "email", "eus", "gal", "gov", "info", "int", "io", "jobs", "law", "live", "ltd",
    "media", "mil", "mobi", "museum", "name", "net", "news", "online", "org", "page", "post", "pro",
    "shop", "site", "space", "store", "swiss", "tech", "tel", "travel", "wiki", "work", "xxx",
    "xyz", "berlin", "hamburg", "koeln", "london", "nyc", "paris", "tokyo", "wien", "bayern",
    "ruhr", "nrw", "saarland", "zuerich", "amsterdam", "brussels", "barcelona", "quebec", "scot",
    "wales", "cymru", "bzh", "corsica", "alsace", "agency", "art", "bio", "business", "center",
    "company", "consulting", "digital", "eco", "energy", "events", "expert", "family", "finance",
    "fit", "fun", "gmbh", "group", "guru", "health", "host", "how", "immo", "inc", "institute",
    "international", "link", "llc", "love", "management", "market", "marketing", "network",
    "one", "partners", "photo", "photography", "plus", "press", "rocks", "run", "schule",
    "services", "social", "software", "solutions", "studio", "support", "systems", "team",
    "today", "tools", "top", "training", "video", "website", "world", "zone",
];

/// Country-code TLDs, including the internationalized ones in ACE form.
const COUNTRY: &[&str] = &[
    "ac", "ad", "ae", "af", "ag", "ai", "al", "am", "ao", "aq", "ar", "as", "at", "au", "aw", "ax",
    "az", "ba", "bb", "bd", "be", "bf", "bg", "bh", "bi", "bj", "bm", "bn", "bo", "br", "bs", "bt",
    "bw", "by", "bz", "ca", "cc", "cd", "cf", "cg", "ch", "ci", "ck", "cl", "cm", "cn", "co", "cr",
    "cu", "cv", "cw", "cx", "cy", "cz", "de", "dj", "dk", "dm", "do", "dz", "ec", "ee", "eg", "er",
    "es", "et", "eu", "fi", "fj", "fk", "fm", "fo", "fr", "ga", "gd", "ge", "gf", "gg", "gh", "gi",
    "gl", "gm", "gn", "gp", "gq", "gr", "gs", "gt", "gu", "gw", "gy", "hk", "hm", "hn", "hr", "ht",
    "hu", "id", "ie", "il", "im", "in", "iq", "ir", "is", "it", "je", "jm", "jo", "jp", "ke", "kg",
    "kh", "ki", "km", "kn", "kp", "kr", "kw", "ky", "kz", "la", "lb", "lc", "li", "lk", "lr", "ls",
    "lt", "lu", "lv", "ly", "ma", "mc", "md", "me", "mg", "mh", "mk", "ml", "mm", "mn", "mo", "mp",
    "mq", "mr", "ms", "mt", "mu", "mv", "mw", "mx", "my", "mz", "na", "nc", "ne", "nf", "ng", "ni",
    "nl", "no", "np", "nr", "nu", "nz", "om", "pa", "pe", "pf", "pg", "ph", "pk", "pl", "pm", "pn",
    "pr", "ps", "pt", "pw", "py", "qa", "re", "ro", "rs", "ru", "rw", "sa", "sb", "sc", "sd", "se",
    "sg", "sh", "si", "sk", "sl", "sm", "sn", "so", "sr", "ss", "st", "su", "sv", "sx", "sy", "sz",
    "tc", "td", "tf", "tg", "th", "tj", "tk", "tl", "tm", "tn", "to", "tr", "tt", "tv", "tw", "tz",
    "ua", "ug", "uk", "us", "uy", "uz", "va", "vc", "ve", "vg", "vi", "vn", "vu", "wf", "ws", "ye",
    "yt", "za", "zm", "zw", "xn--p1ai", "xn--90ais", "xn--j1amh", "xn--d1alf", "xn--node",
    "xn--fiqs8s", "xn--fiqz9s", "xn--wgbh1c", "xn--mgbaam7a8h", "xn--mgberp4a5d4ar", "xn--3e0b707e",
    "xn--kprw13d", "xn--kpry57d", "xn--o3cw4h", "xn--h2brj9c", "xn--qxam", "xn--e1a4c",
];

static DEFAULT_TLDS: LazyLock<Arc<TldList>> =
    LazyLock::new(|| Arc::new(GENERIC.iter().chain(COUNTRY).copied().collect()));

/// A set of known top-level domains.
///
/// The built-in list covers the country codes and the widely used generic
/// TLDs. Deployments that need the full, current IANA list should load it
/// and build their own with [`FromIterator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldList {
    entries: HashSet<String>,
}

impl TldList {
    /// Returns the shared built-in list.
    pub fn shared_default() -> Arc<TldList> {
        Arc::clone(&DEFAULT_TLDS)
    }

    /// Returns true if `label` is a known TLD.
    ///
    /// Matching is case-insensitive; internationalized labels are compared in
    /// their ASCII (`xn--`) form.
    pub fn contains(&self, label: &str) -> bool {
        if label.is_ascii() {
            return self.entries.contains(&label.to_ascii_lowercase());
        }
        match Host::parse(label) {
            Ok(Host::Domain(ascii)) => self.entries.contains(&ascii),
            _ => false,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TldList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|tld| tld.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|tld| !tld.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_has_common_tlds() {
        let tlds = TldList::shared_default();

        for tld in ["com", "org", "de", "uk", "io", "dev"] {
            assert!(tlds.contains(tld), "{tld}");
        }
        assert!(!tlds.contains("example"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(TldList::shared_default().contains("COM"));
    }

    #[test]
    fn internationalized_labels_match_ace_form() {
        let tlds = TldList::shared_default();

        assert!(tlds.contains("рф"));
        assert!(tlds.contains("xn--p1ai"));
    }

    #[test]
    fn custom_list_normalizes_entries() {
        let tlds: TldList = [".Test", "LOCAL", ""].into_iter().collect();

        assert_eq!(tlds.len(), 2);
        assert!(tlds.contains("test"));
        assert!(tlds.contains("local"));
    }
}
