//! Call links and the fixed society intercom list.

use crate::models::StoredContact;
use serde::Serialize;

/// Country code prepended for WhatsApp links.
const WHATSAPP_COUNTRY_CODE: &str = "91";

/// Ways to reach a listed contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallLinks {
    pub tel: String,
    pub whatsapp: String,
}

impl CallLinks {
    pub fn for_phone(phone: &str) -> Self {
        Self {
            tel: format!("tel:{}", phone),
            whatsapp: format!("https://wa.me/{}{}", WHATSAPP_COUNTRY_CODE, phone),
        }
    }

    pub fn for_contact(contact: &StoredContact) -> Self {
        Self::for_phone(&contact.phone)
    }
}

/// An intercom extension inside the society.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SocietyContact {
    pub name: &'static str,
    pub extension: &'static str,
    pub description: &'static str,
}

impl SocietyContact {
    /// Intercom extensions are dialled directly, no WhatsApp.
    pub fn tel_link(&self) -> String {
        format!("tel:{}", self.extension)
    }
}

const SOCIETY_CONTACTS: [SocietyContact; 5] = [
    SocietyContact {
        name: "Reception (Wing D)",
        extension: "10001",
        description: "Main Reception - Wing D",
    },
    SocietyContact {
        name: "Reception (Wing L)",
        extension: "90001",
        description: "Main Reception - Wing L",
    },
    SocietyContact {
        name: "Helpdesk",
        extension: "10011",
        description: "Wing D - Helpdesk",
    },
    SocietyContact {
        name: "PMS Office",
        extension: "10012",
        description: "Wing D - Property Management",
    },
    SocietyContact {
        name: "BMS",
        extension: "10014",
        description: "Wing D - Building Management",
    },
];

/// Intercom numbers for society services.
pub fn society_contacts() -> &'static [SocietyContact] {
    &SOCIETY_CONTACTS
}
