/// A queried name cut into the part kept in the store's `name` column and the
/// apex domain the store is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitName<'a> {
    pub subdomain: &'a str,
    pub apex: &'a str,
}

/// Splits `domain` so that the apex is its last two labels.
///
/// Public suffixes are not consulted, so `www.example.co.uk` yields the apex
/// `co.uk` and the subdomain `www.example`.
pub fn split_domain(domain: &str) -> SplitName<'_> {
    let second_last_dot = domain
        .rfind('.')
        .and_then(|last| domain[..last].rfind('.'));
    match second_last_dot {
        Some(dot) => SplitName {
            subdomain: &domain[..dot],
            apex: &domain[dot + 1..],
        },
        None => SplitName {
            subdomain: "",
            apex: domain,
        },
    }
}
