use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum Brand {
    CryptoNexus,
    TokenForge,
    ChainPulse,
}

impl Brand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::CryptoNexus => "cryptonexus",
            Brand::TokenForge => "tokenforge",
            Brand::ChainPulse => "chainpulse",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Brand::CryptoNexus => "CryptoNexus",
            Brand::TokenForge => "TokenForge",
            Brand::ChainPulse => "ChainPulse",
        }
    }

    /// Line shown under the newsletter heading.
    pub fn pitch(&self) -> &'static str {
        match self {
            Brand::CryptoNexus => {
                "Subscribe to our newsletter and be the first to know about new features, \
                token updates, and exclusive opportunities."
            }
            Brand::TokenForge => {
                "Subscribe to get forge launches, staking updates, and early access \
                announcements straight to your inbox."
            }
            Brand::ChainPulse => {
                "Subscribe for market pulses, protocol upgrades, and community rewards \
                as soon as they go live."
            }
        }
    }
}

impl TryFrom<String> for Brand {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "cryptonexus" => Ok(Brand::CryptoNexus),
            "tokenforge" => Ok(Brand::TokenForge),
            "chainpulse" => Ok(Brand::ChainPulse),
            other => Err(format!(
                "`{other}` is not a supported brand. \
                Use either `cryptonexus`, `tokenforge` or `chainpulse`."
            )),
        }
    }
}
