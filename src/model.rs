//! Invoice and organization input model.
//!
//! Every field the documents read is an explicit `Option`. Absent values are
//! resolved by [`crate::config::Placeholders`] at render time, never here.
//!
//! Field names accept both English keys and the Finnish keys used by the
//! membership register export (`nimi`, `pankkitili`, `viitenumero`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Organization issuing the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    /// Organization name
    #[serde(alias = "nimi")]
    pub name: Option<String>,
    /// Street address
    #[serde(alias = "katuosoite")]
    pub street_address: Option<String>,
    /// Postal code
    #[serde(alias = "postinumero")]
    pub postal_code: Option<String>,
    /// Post office / city
    #[serde(alias = "postitoimipaikka")]
    pub city: Option<String>,
    /// Phone number
    #[serde(alias = "puhelinnumero")]
    pub phone: Option<String>,
    /// Email address
    #[serde(alias = "sahkoposti")]
    pub email: Option<String>,
    /// Business id (Y-tunnus)
    #[serde(alias = "y_tunnus")]
    pub business_id: Option<String>,
    /// Bank account, IBAN-like
    #[serde(alias = "pankkitili")]
    pub bank_account: Option<String>,
    /// Bank identifier code
    pub bic: Option<String>,
}

impl Organization {
    /// Create an organization with a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the street address.
    pub fn with_street_address(mut self, street: impl Into<String>) -> Self {
        self.street_address = Some(street.into());
        self
    }

    /// Set postal code and city.
    pub fn with_postal(mut self, postal_code: impl Into<String>, city: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self.city = Some(city.into());
        self
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the business id.
    pub fn with_business_id(mut self, id: impl Into<String>) -> Self {
        self.business_id = Some(id.into());
        self
    }

    /// Set the bank account.
    pub fn with_bank_account(mut self, account: impl Into<String>) -> Self {
        self.bank_account = Some(account.into());
        self
    }

    /// Set the BIC.
    pub fn with_bic(mut self, bic: impl Into<String>) -> Self {
        self.bic = Some(bic.into());
        self
    }

    /// "postal city" when both parts are present.
    pub fn postal_line(&self) -> Option<String> {
        postal_line(self.postal_code.as_deref(), self.city.as_deref())
    }

    /// Contact for the footer: email preferred over phone.
    pub fn contact(&self) -> Option<&str> {
        non_empty(self.email.as_deref()).or_else(|| non_empty(self.phone.as_deref()))
    }
}

/// Household or person receiving the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipient {
    /// Named recipient
    #[serde(alias = "vastaanottaja")]
    pub name: Option<String>,
    /// Household label
    #[serde(alias = "talouden_nimi")]
    pub household_name: Option<String>,
}

impl Recipient {
    /// Recipient name, falling back to the household label.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref()).or_else(|| non_empty(self.household_name.as_deref()))
    }
}

/// Postal address of the recipient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Street address
    #[serde(alias = "katuosoite")]
    pub street_address: Option<String>,
    /// Postal code
    #[serde(alias = "postinumero")]
    pub postal_code: Option<String>,
    /// Post office / city
    #[serde(alias = "postitoimipaikka")]
    pub city: Option<String>,
}

impl Address {
    /// "postal city" when both parts are present.
    pub fn postal_line(&self) -> Option<String> {
        postal_line(self.postal_code.as_deref(), self.city.as_deref())
    }
}

/// Member a line item is billed for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    /// First name
    #[serde(alias = "etunimi")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(alias = "sukunimi")]
    pub last_name: Option<String>,
}

impl Member {
    /// Create a member.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    /// "First Last", skipping absent parts. `None` when both are absent.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .filter_map(non_empty)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// One billed line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceLine {
    /// Line description
    #[serde(alias = "kuvaus")]
    pub description: Option<String>,
    /// Member the line concerns
    #[serde(alias = "jasen")]
    pub member: Option<Member>,
    /// Line amount in euros
    #[serde(alias = "summa")]
    pub amount: Option<f64>,
}

impl InvoiceLine {
    /// Create a line item.
    pub fn new(description: impl Into<String>, member: Member, amount: f64) -> Self {
        Self {
            description: Some(description.into()),
            member: Some(member),
            amount: Some(amount),
        }
    }

    /// Amount, zero when absent.
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// Invoice to render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    /// Invoice identifier (numbers are accepted and kept as text)
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    /// Issue date, `YYYY-MM-DD`
    #[serde(alias = "luontipaiva")]
    pub issue_date: Option<String>,
    /// Due date, `YYYY-MM-DD`
    #[serde(alias = "erapaiva")]
    pub due_date: Option<String>,
    /// Payment reference
    #[serde(alias = "viitenumero")]
    pub reference: Option<String>,
    /// Invoice total in euros
    #[serde(alias = "summa")]
    pub total: Option<f64>,
    /// Line items in display order
    pub lines: Vec<InvoiceLine>,
    /// Recipient
    #[serde(alias = "household")]
    pub recipient: Option<Recipient>,
    /// Recipient address
    pub address: Option<Address>,
}

impl Invoice {
    /// Create an invoice with an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Set the issue date.
    pub fn with_issue_date(mut self, date: impl Into<String>) -> Self {
        self.issue_date = Some(date.into());
        self
    }

    /// Set the due date.
    pub fn with_due_date(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    /// Set the payment reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the total.
    pub fn with_total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    /// Append a line item.
    pub fn with_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Set the recipient name.
    pub fn with_recipient(mut self, name: impl Into<String>) -> Self {
        self.recipient = Some(Recipient {
            name: Some(name.into()),
            household_name: None,
        });
        self
    }

    /// Set the recipient address.
    pub fn with_address(
        mut self,
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.address = Some(Address {
            street_address: Some(street.into()),
            postal_code: Some(postal_code.into()),
            city: Some(city.into()),
        });
        self
    }

    /// Sum of line amounts, absent amounts counting as zero.
    pub fn line_sum(&self) -> f64 {
        self.lines.iter().map(InvoiceLine::amount_or_zero).sum()
    }

    /// Amount shown as the total: the total field when present, else the line sum.
    pub fn display_total(&self) -> f64 {
        self.total.unwrap_or_else(|| self.line_sum())
    }

    /// Whether the line sum disagrees with an explicit total by more than a cent.
    pub fn has_total_mismatch(&self) -> bool {
        match self.total {
            Some(total) => (total - self.line_sum()).abs() >= 0.005,
            None => false,
        }
    }

    /// Due date parsed as a calendar date.
    pub fn parsed_due_date(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(crate::format::parse_date)
    }

    /// Recipient display name, if any.
    pub fn recipient_name(&self) -> Option<&str> {
        self.recipient.as_ref().and_then(Recipient::display_name)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn postal_line(code: Option<&str>, city: Option<&str>) -> Option<String> {
    match (non_empty(code), non_empty(city)) {
        (Some(code), Some(city)) => Some(format!("{} {}", code, city)),
        _ => None,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(i64),
        Text(String),
    }

    Ok(Option::<IdRepr>::deserialize(deserializer)?.map(|id| match id {
        IdRepr::Number(n) => n.to_string(),
        IdRepr::Text(s) => s,
    }))
}
