//! Premium membership offer shown on the membership page and in the upsell dialog.
//!
//! Purchases happen on an external community platform. This module only
//! describes the offer and the outbound link; nothing comes back from the
//! platform.

use gestorq_core::{AppError, AppResult};
use url::Url;

/// Checkout link used when none is configured.
pub const DEFAULT_CHECKOUT_URL: &str = "https://www.skool.com/gestorq-8720";

/// One benefit listed on the membership card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipBenefit {
    /// Icon key understood by the front-end.
    pub icon: &'static str,
    /// Short title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
}

const BENEFITS: &[MembershipBenefit] = &[
    MembershipBenefit {
        icon: "headphones",
        title: "Soporte Exclusivo",
        description: "Acceso prioritario a nuestro equipo de soporte",
    },
    MembershipBenefit {
        icon: "book-open",
        title: "Acceso a Cursos",
        description: "Formación completa sobre gestión de negocios",
    },
    MembershipBenefit {
        icon: "users",
        title: "Comunidad Privada",
        description: "Conecta con otros profesionales del sector",
    },
    MembershipBenefit {
        icon: "zap",
        title: "Gestión Ilimitada",
        description: "Sin límites en clientes, citas o inventario",
    },
];

/// Link opened in a new browsing context without an opener reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLink {
    url: Url,
}

impl OutboundLink {
    /// Parses and validates an absolute http(s) link.
    pub fn parse(value: &str) -> AppResult<Self> {
        let url = Url::parse(value.trim()).map_err(|error| {
            AppError::Validation(format!("invalid checkout url '{value}': {error}"))
        })?;

        if !matches!(url.scheme(), "https" | "http") {
            return Err(AppError::Validation(format!(
                "checkout url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        Ok(Self { url })
    }

    /// Returns the link target.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Browsing context the link opens in.
    #[must_use]
    pub fn target(&self) -> &'static str {
        "_blank"
    }

    /// Link relation that drops the opener and referrer.
    #[must_use]
    pub fn rel(&self) -> &'static str {
        "noopener noreferrer"
    }
}

/// Content of the membership card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipOffer {
    checkout_link: OutboundLink,
}

impl MembershipOffer {
    /// Creates the offer pointing at `checkout_url`.
    pub fn new(checkout_url: &str) -> AppResult<Self> {
        Ok(Self {
            checkout_link: OutboundLink::parse(checkout_url)?,
        })
    }

    /// Small caption above the title.
    #[must_use]
    pub fn badge(&self) -> &'static str {
        "Membresía Premium"
    }

    /// Card title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        "GestorQ Pro / Comunidad"
    }

    /// Card subtitle.
    #[must_use]
    pub fn tagline(&self) -> &'static str {
        "Lleva tu negocio al siguiente nivel con acceso exclusivo"
    }

    /// Listed benefits in display order.
    #[must_use]
    pub fn benefits(&self) -> &'static [MembershipBenefit] {
        BENEFITS
    }

    /// Call-to-action button label.
    #[must_use]
    pub fn call_to_action(&self) -> &'static str {
        "Únete ahora y Paga Seguro en Skool"
    }

    /// Note shown under the call to action.
    #[must_use]
    pub fn payment_note(&self) -> &'static str {
        "Pagos procesados de forma segura a través de la plataforma Skool"
    }

    /// Where the call to action leads.
    #[must_use]
    pub fn checkout_link(&self) -> &OutboundLink {
        &self.checkout_link
    }
}

/// Accessible heading of the upsell dialog.
pub const MEMBERSHIP_MODAL_TITLE: &str = "GestorQ Pro";

/// Accessible description of the upsell dialog.
pub const MEMBERSHIP_MODAL_DESCRIPTION: &str = "Únete a nuestra comunidad premium";

/// Heading of the standalone membership page.
pub const MEMBERSHIP_PAGE_HEADING: &str = "Membresía Premium";

/// Subheading of the standalone membership page.
pub const MEMBERSHIP_PAGE_SUBHEADING: &str =
    "Accede a todas las funciones exclusivas de GestorQ Pro";
