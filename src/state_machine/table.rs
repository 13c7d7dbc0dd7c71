//! Routing table for the selection-driven menus
//!
//! Keyed by `(SelectionState, MenuOption)`. The match is exhaustive, so adding
//! a state or an option without routing it fails to compile.

use super::plan::{ContentItem, ContentPlan, ImageId, TemplateId};
use super::turn::MenuOption;
use crate::session::{MenuState, SelectionState};

/// One static piece of a menu reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Text(TemplateId),
    Image(ImageId),
}

impl Step {
    fn to_item(self) -> ContentItem {
        match self {
            Step::Text(t) => ContentItem::text(t),
            Step::Image(i) => ContentItem::image(i),
        }
    }
}

/// Destination and reply for a menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub next: MenuState,
    pub steps: &'static [Step],
    /// Whether the selection was an error re-prompt
    pub rejected: bool,
}

impl Route {
    const fn to(next: MenuState, steps: &'static [Step]) -> Self {
        Self {
            next,
            steps,
            rejected: false,
        }
    }

    const fn reject(next: MenuState, steps: &'static [Step]) -> Self {
        Self {
            next,
            steps,
            rejected: true,
        }
    }

    pub fn plan(&self) -> ContentPlan {
        plan_of(self.steps)
    }
}

fn plan_of(steps: &[Step]) -> ContentPlan {
    steps.iter().map(|s| s.to_item()).collect()
}

/// The bare main menu, used when a conversation is reset
pub fn main_menu_plan() -> ContentPlan {
    plan_of(MAIN_MENU)
}

const MAIN_MENU: &[Step] = &[Step::Text(TemplateId::MainMenu)];
const MAIN_MENU_INVALID: &[Step] = &[
    Step::Text(TemplateId::InvalidMainOption),
    Step::Text(TemplateId::MainMenu),
];

const PORTABILITY: &[Step] = &[
    Step::Image(ImageId::Portability3Steps),
    Step::Text(TemplateId::PortabilityMenu),
];
const PORTABILITY_FROM_PACKAGES: &[Step] = &[
    Step::Image(ImageId::Portability3Steps),
    Step::Text(TemplateId::PortabilityFromPackages),
];
const PACKAGES: &[Step] = &[
    Step::Image(ImageId::PackagesPromo),
    Step::Text(TemplateId::PackagesCatalog),
];
const SUPPORT: &[Step] = &[Step::Text(TemplateId::Support)];

const PACKAGES_COMING_SOON: &[Step] = &[Step::Text(TemplateId::PackagesComingSoon)];
const PACKAGES_CONTACT: &[Step] = &[Step::Text(TemplateId::PackagesContact)];
const PACKAGES_INVALID: &[Step] = &[Step::Text(TemplateId::PackagesInvalid)];

const NIP_INSTRUCTIONS: &[Step] = &[
    Step::Image(ImageId::HowToGetNip),
    Step::Text(TemplateId::NipInstructions),
    Step::Text(TemplateId::NipMenu),
];
const PORTABILITY_DOCUMENTS: &[Step] = &[Step::Text(TemplateId::PortabilityDocuments)];
const PORTABILITY_CONTACT: &[Step] = &[Step::Text(TemplateId::PortabilityContact)];
const PORTABILITY_INVALID: &[Step] = &[Step::Text(TemplateId::PortabilityInvalid)];

const NIP_CAPTURE: &[Step] = &[Step::Text(TemplateId::NipCaptureRequest)];
const NIP_WHERE_TO_TYPE: &[Step] = &[Step::Text(TemplateId::NipWhereToType)];
const NIP_CONTACT: &[Step] = &[Step::Text(TemplateId::NipContact)];
const NIP_INVALID: &[Step] = &[Step::Text(TemplateId::NipInvalid)];

const ESIM_ACTIVATE: &[Step] = &[Step::Text(TemplateId::EsimActivateStart)];
const ESIM_PACKAGES: &[Step] = &[
    Step::Image(ImageId::PackagesPromo),
    Step::Text(TemplateId::EsimPackagesReminder),
];
const ESIM_EXPLAINER: &[Step] = &[Step::Text(TemplateId::EsimExplainer)];
const ESIM_CONTACT: &[Step] = &[Step::Text(TemplateId::EsimContact)];
const ESIM_INVALID: &[Step] = &[Step::Text(TemplateId::EsimInvalid)];

const ADVANCE_WHATSAPP: &[Step] = &[Step::Text(TemplateId::AdvanceNipWhatsapp)];
const ADVANCE_PHONE: &[Step] = &[Step::Text(TemplateId::AdvanceNipPhone)];
const ADVANCE_INVALID: &[Step] = &[Step::Text(TemplateId::AdvanceNipInvalid)];

/// Look up where a selection leads
pub fn route(state: SelectionState, option: MenuOption) -> Route {
    use MenuOption::{Back, Four, Invalid, One, Three, Two};
    use SelectionState as S;

    match (state, option) {
        // "0" returns to the main menu from every menu
        (_, Back) => Route::to(MenuState::MainMenu, MAIN_MENU),

        (S::MainMenu, One) => Route::to(MenuState::PortabilitySubmenu, PORTABILITY),
        (S::MainMenu, Two) => Route::to(MenuState::PackagesSubmenu, PACKAGES),
        (S::MainMenu, Three) => Route::to(MenuState::SupportSubmenu, SUPPORT),
        (S::MainMenu, Four | Invalid) => Route::reject(MenuState::MainMenu, MAIN_MENU_INVALID),

        (S::PackagesSubmenu, One) => {
            Route::to(MenuState::PortabilitySubmenu, PORTABILITY_FROM_PACKAGES)
        }
        (S::PackagesSubmenu, Two) => Route::to(MenuState::PackagesSubmenu, PACKAGES_COMING_SOON),
        (S::PackagesSubmenu, Three) => Route::to(MenuState::PackagesSubmenu, PACKAGES_CONTACT),
        (S::PackagesSubmenu, Four | Invalid) => {
            Route::reject(MenuState::PackagesSubmenu, PACKAGES_INVALID)
        }

        (S::PortabilitySubmenu, One) => Route::to(MenuState::NipSubmenu, NIP_INSTRUCTIONS),
        (S::PortabilitySubmenu, Two) => {
            Route::to(MenuState::PortabilitySubmenu, PORTABILITY_DOCUMENTS)
        }
        (S::PortabilitySubmenu, Three) => {
            Route::to(MenuState::PortabilitySubmenu, PORTABILITY_CONTACT)
        }
        (S::PortabilitySubmenu, Four | Invalid) => {
            Route::reject(MenuState::PortabilitySubmenu, PORTABILITY_INVALID)
        }

        (S::NipSubmenu, One) => Route::to(MenuState::CaptureNip, NIP_CAPTURE),
        (S::NipSubmenu, Two) => Route::to(MenuState::NipSubmenu, NIP_WHERE_TO_TYPE),
        (S::NipSubmenu, Three) => Route::to(MenuState::NipSubmenu, NIP_CONTACT),
        (S::NipSubmenu, Four | Invalid) => Route::reject(MenuState::NipSubmenu, NIP_INVALID),

        (S::EsimValidMenu, One) => Route::to(MenuState::RegisterName, ESIM_ACTIVATE),
        (S::EsimValidMenu, Two) => Route::to(MenuState::EsimValidMenu, ESIM_PACKAGES),
        (S::EsimValidMenu, Three) => Route::to(MenuState::EsimValidMenu, ESIM_EXPLAINER),
        (S::EsimValidMenu, Four) => Route::to(MenuState::EsimValidMenu, ESIM_CONTACT),
        (S::EsimValidMenu, Invalid) => Route::reject(MenuState::EsimValidMenu, ESIM_INVALID),

        // Support only offers "0"; anything else repeats the contact card
        (S::SupportSubmenu, One | Two | Three | Four | Invalid) => {
            Route::to(MenuState::SupportSubmenu, SUPPORT)
        }

        (S::AdvanceNipSubmenu, One) => Route::to(MenuState::AdvanceNipSubmenu, ADVANCE_WHATSAPP),
        (S::AdvanceNipSubmenu, Two) => Route::to(MenuState::AdvanceNipSubmenu, ADVANCE_PHONE),
        (S::AdvanceNipSubmenu, Three | Four | Invalid) => {
            Route::reject(MenuState::AdvanceNipSubmenu, ADVANCE_INVALID)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECTION_STATES: [SelectionState; 7] = [
        SelectionState::MainMenu,
        SelectionState::PackagesSubmenu,
        SelectionState::PortabilitySubmenu,
        SelectionState::NipSubmenu,
        SelectionState::EsimValidMenu,
        SelectionState::SupportSubmenu,
        SelectionState::AdvanceNipSubmenu,
    ];

    #[test]
    fn test_every_pair_routes_somewhere_valid() {
        for state in SELECTION_STATES {
            for option in MenuOption::ALL {
                let route = route(state, option);
                assert_ne!(route.next, MenuState::Unrecognized);
                assert!(!route.steps.is_empty(), "{state:?} + {option:?} has no reply");
            }
        }
    }

    #[test]
    fn test_back_always_main_menu() {
        for state in SELECTION_STATES {
            let route = route(state, MenuOption::Back);
            assert_eq!(route.next, MenuState::MainMenu);
            assert_eq!(route.steps, MAIN_MENU);
        }
    }

    #[test]
    fn test_invalid_keeps_state() {
        for state in SELECTION_STATES {
            let route = route(state, MenuOption::Invalid);
            assert_eq!(route.next, MenuState::from(state));
        }
    }

    #[test]
    fn test_rejections_only_for_invalid_input() {
        for state in SELECTION_STATES {
            for option in [MenuOption::Back, MenuOption::One, MenuOption::Two] {
                assert!(!route(state, option).rejected, "{state:?} + {option:?}");
            }
        }
    }

    #[test]
    fn test_main_menu_images() {
        let portability = route(SelectionState::MainMenu, MenuOption::One).plan();
        assert!(portability.contains_image(ImageId::Portability3Steps));
        assert!(portability.contains_template(TemplateId::PortabilityMenu));

        let packages = route(SelectionState::MainMenu, MenuOption::Two).plan();
        assert_eq!(packages.items()[0], ContentItem::image(ImageId::PackagesPromo));
    }

    #[test]
    fn test_esim_menu_leads_to_registration() {
        let route = route(SelectionState::EsimValidMenu, MenuOption::One);
        assert_eq!(route.next, MenuState::RegisterName);
    }
}
