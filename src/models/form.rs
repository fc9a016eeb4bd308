use serde::{Deserialize, Serialize};

/// The single entity behind the donation form.
///
/// Field names are camelCase on the wire to match the form's field paths
/// (`fullName`, `donationsAmount`, ...). The `donations` sequence is only
/// present in the extended variant of the form; the simpler variant omits
/// the key entirely, which deserializes to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    #[serde(default)]
    pub full_name: String,

    /// `None` models an absent amount, distinct from an amount of 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donations_amount: Option<f64>,

    #[serde(default)]
    pub terms_and_conditions: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donations: Option<Vec<Donation>>,
}

/// One beneficiary row in the `donations` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    #[serde(default)]
    pub institution: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl Default for FormValues {
    /// The page-load state: everything blank, terms unaccepted, and one
    /// empty donation row ready for input.
    fn default() -> Self {
        Self {
            full_name: String::new(),
            donations_amount: Some(0.0),
            terms_and_conditions: false,
            donations: Some(vec![Donation::default()]),
        }
    }
}

impl FormValues {
    /// The simpler form variant, without the beneficiary list.
    pub fn basic() -> Self {
        Self {
            donations: None,
            ..Self::default()
        }
    }

    /// Append an empty donation row, creating the sequence if this was the
    /// simpler variant.
    pub fn add_donation(&mut self) {
        self.donations
            .get_or_insert_with(Vec::new)
            .push(Donation::default());
    }

    /// Remove the donation row at `index`. Returns the removed row, or
    /// `None` when the index is out of range or the sequence is absent.
    pub fn remove_donation(&mut self, index: usize) -> Option<Donation> {
        let donations = self.donations.as_mut()?;
        if index < donations.len() {
            Some(donations.remove(index))
        } else {
            None
        }
    }
}

impl Default for Donation {
    fn default() -> Self {
        Self {
            institution: String::new(),
            percentage: Some(0.0),
        }
    }
}
