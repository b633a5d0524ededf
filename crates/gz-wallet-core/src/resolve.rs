//! Provider selection when zero, one, or several wallet extensions inject
//! themselves into the page.
//!
//! Selection is an ordered rule list per wallet kind, evaluated top to bottom
//! over a flags-only [`Probe`]. The first rule that yields a [`Decision`] wins.

use gz_api_types::WalletKind;
use tracing::debug;

use crate::error::ConnectError;
use crate::provider::{Eip1193Provider, ProviderFlags};

/// Wallet objects found on the page at connect time.
#[derive(Clone)]
pub struct InjectedEnvironment<P> {
    /// `window.ethereum`.
    pub injected: Option<P>,
    /// `window.ethereum.providers`, present when several extensions are installed.
    pub providers: Option<Vec<P>>,
    /// `window.trustwallet`.
    pub trust_fallback: Option<P>,
}

impl<P> Default for InjectedEnvironment<P> {
    fn default() -> Self {
        Self {
            injected: None,
            providers: None,
            trust_fallback: None,
        }
    }
}

/// Flags-only view of an [`InjectedEnvironment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub kind: WalletKind,
    pub injected: Option<ProviderFlags>,
    pub listed: Option<Vec<ProviderFlags>>,
    pub has_fallback: bool,
    pub mobile: bool,
}

impl Probe {
    pub fn of<P: Eip1193Provider>(env: &InjectedEnvironment<P>, kind: WalletKind, mobile: bool) -> Self {
        let injected = env.injected.as_ref().map(|p| p.flags());
        Self {
            kind,
            injected,
            // The list hangs off the injected object; without it there is no list.
            listed: injected.and(
                env.providers
                    .as_ref()
                    .map(|list| list.iter().map(|p| p.flags()).collect()),
            ),
            has_fallback: env.trust_fallback.is_some(),
            mobile,
        }
    }

    fn single(&self) -> Option<ProviderFlags> {
        match self.listed {
            Some(_) => None,
            None => self.injected,
        }
    }

    fn find_listed(&self, matches: impl Fn(ProviderFlags) -> bool) -> Option<usize> {
        self.listed.as_ref()?.iter().position(|flags| matches(*flags))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Injected,
    Listed(usize),
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Use(Slot),
    /// Hand off to the wallet's mobile app.
    DeepLink,
    /// Nothing installed: prompt and open the download page.
    InstallPrompt,
    /// Only the other supported wallet is present.
    WrongExtension,
    NotFound,
}

pub struct Rule {
    pub name: &'static str,
    pub eval: fn(&Probe) -> Option<Decision>,
}

pub const METAMASK_RULES: &[Rule] = &[
    Rule {
        name: "absent",
        eval: |p| p.injected.is_none().then_some(Decision::InstallPrompt),
    },
    Rule {
        name: "listed-exact",
        eval: |p| {
            p.find_listed(|f| f.is_exactly(WalletKind::MetaMask))
                .map(|i| Decision::Use(Slot::Listed(i)))
        },
    },
    Rule {
        name: "listed-flagged",
        eval: |p| {
            p.find_listed(|f| f.has(WalletKind::MetaMask))
                .map(|i| Decision::Use(Slot::Listed(i)))
        },
    },
    Rule {
        name: "listed-missing",
        eval: |p| p.listed.is_some().then_some(Decision::NotFound),
    },
    Rule {
        name: "single-exact",
        eval: |p| {
            p.single()
                .filter(|f| f.is_exactly(WalletKind::MetaMask))
                .map(|_| Decision::Use(Slot::Injected))
        },
    },
    Rule {
        name: "single-other",
        eval: |p| {
            p.single()
                .filter(|f| f.has(WalletKind::Trust))
                .map(|_| Decision::WrongExtension)
        },
    },
    // Unflagged EIP-1193 wallets are driven as if they were MetaMask.
    Rule {
        name: "single-generic",
        eval: |p| p.single().map(|_| Decision::Use(Slot::Injected)),
    },
];

pub const TRUST_RULES: &[Rule] = &[
    Rule {
        name: "absent",
        eval: |p| {
            (p.injected.is_none() && !p.has_fallback).then_some(if p.mobile {
                Decision::DeepLink
            } else {
                Decision::InstallPrompt
            })
        },
    },
    Rule {
        name: "fallback-only",
        eval: |p| p.injected.is_none().then_some(Decision::Use(Slot::Fallback)),
    },
    Rule {
        name: "listed-exact",
        eval: |p| {
            p.find_listed(|f| f.is_exactly(WalletKind::Trust))
                .map(|i| Decision::Use(Slot::Listed(i)))
        },
    },
    Rule {
        name: "listed-flagged",
        eval: |p| {
            p.find_listed(|f| f.has(WalletKind::Trust))
                .map(|i| Decision::Use(Slot::Listed(i)))
        },
    },
    Rule {
        name: "listed-fallback",
        eval: |p| (p.listed.is_some() && p.has_fallback).then_some(Decision::Use(Slot::Fallback)),
    },
    Rule {
        name: "listed-mobile",
        eval: |p| (p.listed.is_some() && p.mobile).then_some(Decision::DeepLink),
    },
    Rule {
        name: "listed-missing",
        eval: |p| p.listed.is_some().then_some(Decision::NotFound),
    },
    Rule {
        name: "single-flagged",
        eval: |p| {
            p.single()
                .filter(|f| f.has(WalletKind::Trust))
                .map(|_| Decision::Use(Slot::Injected))
        },
    },
    Rule {
        name: "single-fallback",
        eval: |p| p.has_fallback.then_some(Decision::Use(Slot::Fallback)),
    },
    Rule {
        name: "single-other",
        eval: |p| {
            p.single()
                .filter(|f| f.has(WalletKind::MetaMask))
                .map(|_| Decision::WrongExtension)
        },
    },
    Rule {
        name: "single-mobile",
        eval: |p| p.mobile.then_some(Decision::DeepLink),
    },
    Rule {
        name: "single-missing",
        eval: |_| Some(Decision::NotFound),
    },
];

pub fn rules_for(kind: WalletKind) -> &'static [Rule] {
    match kind {
        WalletKind::MetaMask => METAMASK_RULES,
        WalletKind::Trust => TRUST_RULES,
    }
}

/// Evaluate the kind's rules in order. Returns the matching rule's name with its decision.
pub fn decide(probe: &Probe) -> (&'static str, Decision) {
    rules_for(probe.kind)
        .iter()
        .find_map(|rule| (rule.eval)(probe).map(|d| (rule.name, d)))
        .unwrap_or(("exhausted", Decision::NotFound))
}

/// Outcome of resolving a provider for a connect request.
#[derive(Debug, Clone)]
pub enum Resolution<P> {
    Provider(P),
    DeepLink,
    InstallPrompt,
    Refused(ConnectError),
}

pub fn resolve<P: Eip1193Provider + Clone>(
    env: &InjectedEnvironment<P>,
    kind: WalletKind,
    mobile: bool,
) -> Resolution<P> {
    let probe = Probe::of(env, kind, mobile);
    let (rule, decision) = decide(&probe);
    debug!(?kind, rule, ?decision, "provider resolution");

    let slot = match decision {
        Decision::Use(slot) => slot,
        Decision::DeepLink => return Resolution::DeepLink,
        Decision::InstallPrompt => return Resolution::InstallPrompt,
        Decision::WrongExtension => return Resolution::Refused(ConnectError::WrongExtension(kind)),
        Decision::NotFound => return Resolution::Refused(ConnectError::NotFound(kind)),
    };

    let provider = match slot {
        Slot::Injected => env.injected.clone(),
        Slot::Listed(i) => env.providers.as_ref().and_then(|list| list.get(i).cloned()),
        Slot::Fallback => env.trust_fallback.clone(),
    };
    match provider {
        Some(p) => Resolution::Provider(p),
        None => Resolution::Refused(ConnectError::NotFound(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeProvider;

    fn both() -> ProviderFlags {
        ProviderFlags {
            is_metamask: true,
            is_trust: true,
        }
    }

    fn env(
        injected: Option<FakeProvider>,
        providers: Option<Vec<FakeProvider>>,
        trust_fallback: Option<FakeProvider>,
    ) -> InjectedEnvironment<FakeProvider> {
        InjectedEnvironment {
            injected,
            providers,
            trust_fallback,
        }
    }

    fn picked(resolution: Resolution<FakeProvider>) -> &'static str {
        match resolution {
            Resolution::Provider(p) => p.id(),
            other => panic!("expected a provider, got {other:?}"),
        }
    }

    #[test]
    fn nothing_installed_prompts_install_for_both_kinds() {
        let empty = InjectedEnvironment::<FakeProvider>::default();
        for kind in WalletKind::ALL {
            assert!(matches!(resolve(&empty, kind, false), Resolution::InstallPrompt));
        }
        assert!(matches!(resolve(&empty, WalletKind::MetaMask, true), Resolution::InstallPrompt));
        assert!(matches!(resolve(&empty, WalletKind::Trust, true), Resolution::DeepLink));
    }

    #[test]
    fn listed_match_wins_regardless_of_order() {
        for kind in WalletKind::ALL {
            let (want, other) = match kind {
                WalletKind::MetaMask => (ProviderFlags::metamask(), ProviderFlags::trust()),
                WalletKind::Trust => (ProviderFlags::trust(), ProviderFlags::metamask()),
            };
            let wanted = FakeProvider::named("wanted", want);
            let unwanted = FakeProvider::named("unwanted", other);
            let head = FakeProvider::named("head", other);

            let forward = env(Some(head.clone()), Some(vec![wanted.clone(), unwanted.clone()]), None);
            let reverse = env(Some(head), Some(vec![unwanted, wanted]), None);
            assert_eq!(picked(resolve(&forward, kind, false)), "wanted");
            assert_eq!(picked(resolve(&reverse, kind, false)), "wanted");
        }
    }

    #[test]
    fn exact_flag_preferred_over_conflicting_flags() {
        let impostor = FakeProvider::named("impostor", both());
        let metamask = FakeProvider::named("metamask", ProviderFlags::metamask());
        let list = env(Some(impostor.clone()), Some(vec![impostor.clone(), metamask]), None);
        assert_eq!(picked(resolve(&list, WalletKind::MetaMask, false)), "metamask");

        // With only the conflicting entry, it is still accepted.
        let list = env(Some(impostor.clone()), Some(vec![impostor]), None);
        assert_eq!(picked(resolve(&list, WalletKind::MetaMask, false)), "impostor");
    }

    #[test]
    fn exact_trust_preferred_over_conflicting_flags() {
        let impostor = FakeProvider::named("impostor", both());
        let trust = FakeProvider::named("trust", ProviderFlags::trust());
        let metamask = FakeProvider::named("metamask", ProviderFlags::metamask());
        let list = env(
            Some(metamask.clone()),
            Some(vec![metamask.clone(), impostor.clone(), trust]),
            None,
        );
        assert_eq!(picked(resolve(&list, WalletKind::Trust, false)), "trust");
        assert_eq!(picked(resolve(&list, WalletKind::Trust, true)), "trust");

        let list = env(Some(metamask.clone()), Some(vec![metamask, impostor]), None);
        assert_eq!(picked(resolve(&list, WalletKind::Trust, false)), "impostor");
    }

    #[test]
    fn single_other_kind_is_refused() {
        let trust = FakeProvider::named("trust", ProviderFlags::trust());
        match resolve(&env(Some(trust), None, None), WalletKind::MetaMask, false) {
            Resolution::Refused(err) => assert_eq!(err, ConnectError::WrongExtension(WalletKind::MetaMask)),
            other => panic!("unexpected {other:?}"),
        }

        let metamask = FakeProvider::named("metamask", ProviderFlags::metamask());
        match resolve(&env(Some(metamask), None, None), WalletKind::Trust, false) {
            Resolution::Refused(err) => assert_eq!(err, ConnectError::WrongExtension(WalletKind::Trust)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn trust_single_with_both_flags_refused_for_metamask() {
        let injected = FakeProvider::named("trust", both());
        assert!(matches!(
            resolve(&env(Some(injected), None, None), WalletKind::MetaMask, false),
            Resolution::Refused(ConnectError::WrongExtension(WalletKind::MetaMask))
        ));
    }

    #[test]
    fn unflagged_single_provider_serves_metamask() {
        let generic = FakeProvider::named("generic", ProviderFlags::default());
        assert_eq!(
            picked(resolve(&env(Some(generic.clone()), None, None), WalletKind::MetaMask, false)),
            "generic"
        );
        assert!(matches!(
            resolve(&env(Some(generic), None, None), WalletKind::Trust, false),
            Resolution::Refused(ConnectError::NotFound(WalletKind::Trust))
        ));
    }

    #[test]
    fn trust_fallback_global() {
        let fallback = FakeProvider::named("fallback", ProviderFlags::default());
        let metamask = FakeProvider::named("metamask", ProviderFlags::metamask());

        let only_fallback = env(None, None, Some(fallback.clone()));
        assert_eq!(picked(resolve(&only_fallback, WalletKind::Trust, false)), "fallback");

        let listed = env(Some(metamask.clone()), Some(vec![metamask.clone()]), Some(fallback.clone()));
        assert_eq!(picked(resolve(&listed, WalletKind::Trust, false)), "fallback");

        let single = env(Some(metamask), None, Some(fallback));
        assert_eq!(picked(resolve(&single, WalletKind::Trust, false)), "fallback");
    }

    #[test]
    fn listed_without_match() {
        let metamask = FakeProvider::named("metamask", ProviderFlags::metamask());
        let trust = FakeProvider::named("trust", ProviderFlags::trust());

        let no_trust = env(Some(metamask.clone()), Some(vec![metamask]), None);
        assert!(matches!(resolve(&no_trust, WalletKind::Trust, true), Resolution::DeepLink));
        assert!(matches!(
            resolve(&no_trust, WalletKind::Trust, false),
            Resolution::Refused(ConnectError::NotFound(WalletKind::Trust))
        ));

        let no_metamask = env(Some(trust.clone()), Some(vec![trust]), None);
        assert!(matches!(
            resolve(&no_metamask, WalletKind::MetaMask, true),
            Resolution::Refused(ConnectError::NotFound(WalletKind::MetaMask))
        ));
    }

    #[test]
    fn decide_reports_rule_name() {
        let probe = Probe {
            kind: WalletKind::Trust,
            injected: Some(ProviderFlags::default()),
            listed: None,
            has_fallback: false,
            mobile: true,
        };
        assert_eq!(decide(&probe), ("single-mobile", Decision::DeepLink));
    }
}
