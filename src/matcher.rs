//! Match evaluation for network clients.
//!
//! A client is "bad" when its MAC is an exact member of the [`BlockList`] or
//! when either of its candidate manufacturer strings (Dashboard-reported or
//! OUI-derived) contains a [`CompanyList`] fragment. Pure function of its
//! inputs so it can be tested without any API collaborator.

use crate::lists::{BlockList, CompanyList};

/// Why a client was flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReason {
    /// The MAC is on the block list.
    Mac,
    /// A manufacturer string contained this fragment.
    Company(String),
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchReason::Mac => write!(f, "MAC on block list"),
            MatchReason::Company(fragment) => write!(f, "manufacturer contains '{}'", fragment),
        }
    }
}

/// Evaluate a client against both lists.
///
/// The MAC check runs first; the company check tests each fragment against
/// the Dashboard-reported manufacturer, then the OUI-derived one, and the
/// first containing fragment short-circuits. Missing manufacturer strings
/// never match.
pub fn evaluate(
    mac: &str,
    api_manufacturer: Option<&str>,
    oui_manufacturer: Option<&str>,
    macs: &BlockList,
    companies: &CompanyList,
) -> Option<MatchReason> {
    if macs.contains(mac) {
        return Some(MatchReason::Mac);
    }

    for candidate in [api_manufacturer, oui_manufacturer].into_iter().flatten() {
        if let Some(fragment) = companies.first_match(candidate) {
            return Some(MatchReason::Company(fragment.to_string()));
        }
    }

    None
}

/// Boolean verdict, as used by the scan pipeline.
pub fn is_bad_client(
    mac: &str,
    api_manufacturer: Option<&str>,
    oui_manufacturer: Option<&str>,
    macs: &BlockList,
    companies: &CompanyList,
) -> bool {
    evaluate(mac, api_manufacturer, oui_manufacturer, macs, companies).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(macs: &str, companies: &str) -> (BlockList, CompanyList) {
        (BlockList::parse(macs), CompanyList::parse(companies))
    }

    #[test]
    fn test_mac_match_any_manufacturer() {
        let (macs, companies) = lists("AA:BB:CC:DD:EE:FF\n", "Apple\n");
        assert_eq!(
            evaluate("AA:BB:CC:DD:EE:FF", Some("Dell"), None, &macs, &companies),
            Some(MatchReason::Mac)
        );
    }

    #[test]
    fn test_mac_match_noncanonical_input() {
        let (macs, companies) = lists("AA:BB:CC:DD:EE:FF\n", "");
        assert!(is_bad_client("aa-bb-cc-dd-ee-ff", None, None, &macs, &companies));
    }

    #[test]
    fn test_company_match_api_manufacturer() {
        let (macs, companies) = lists("", "Apple\n");
        assert_eq!(
            evaluate(
                "11:22:33:44:55:66",
                Some("Apple Inc."),
                None,
                &macs,
                &companies
            ),
            Some(MatchReason::Company("Apple".to_string()))
        );
    }

    #[test]
    fn test_company_match_oui_manufacturer() {
        let (macs, companies) = lists("", "Espressif\n");
        assert_eq!(
            evaluate(
                "11:22:33:44:55:66",
                Some("Unknown"),
                Some("Espressif Systems"),
                &macs,
                &companies
            ),
            Some(MatchReason::Company("Espressif".to_string()))
        );
    }

    #[test]
    fn test_no_match() {
        let (macs, companies) = lists("AA:BB:CC:DD:EE:FF\n", "Apple\n");
        assert_eq!(
            evaluate(
                "11:22:33:44:55:77",
                Some("Dell"),
                Some("Dell Inc."),
                &macs,
                &companies
            ),
            None
        );
    }

    #[test]
    fn test_missing_manufacturers_never_match() {
        let (macs, companies) = lists("", "Apple\n");
        assert!(!is_bad_client("11:22:33:44:55:66", None, None, &macs, &companies));
        assert!(!is_bad_client(
            "11:22:33:44:55:66",
            Some(""),
            Some(""),
            &macs,
            &companies
        ));
    }

    #[test]
    fn test_company_match_is_case_sensitive() {
        let (macs, companies) = lists("", "Apple\n");
        assert!(!is_bad_client(
            "11:22:33:44:55:66",
            Some("APPLE INC."),
            None,
            &macs,
            &companies
        ));
    }

    #[test]
    fn test_match_reason_display() {
        assert_eq!(MatchReason::Mac.to_string(), "MAC on block list");
        assert_eq!(
            MatchReason::Company("Apple".to_string()).to_string(),
            "manufacturer contains 'Apple'"
        );
    }

    #[test]
    fn test_mixed_client_population() {
        // BlockList = {AA:BB:CC:DD:EE:FF}, CompanyList = [Apple], two matches
        // and one clean client.
        let (macs, companies) = lists("AA:BB:CC:DD:EE:FF\n", "Apple\n");
        assert!(is_bad_client(
            "AA:BB:CC:DD:EE:FF",
            Some("Dell"),
            None,
            &macs,
            &companies
        ));
        assert!(is_bad_client(
            "11:22:33:44:55:66",
            Some("Apple Inc."),
            None,
            &macs,
            &companies
        ));
        assert!(!is_bad_client(
            "11:22:33:44:55:77",
            Some("Dell"),
            None,
            &macs,
            &companies
        ));
    }
}
