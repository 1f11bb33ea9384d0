use serde::{Deserialize, Serialize};

use crate::domain::common::{
    seed_if_empty, AdditionalId, AggregateRoot, BaseAggregate, EntityMetadata, IdentifierType,
};
use crate::shared::errors::ValidationError;

crate::uuid_aggregate_id!(
    /// Identifier of a customer record
    CustomerId
);

/// Buyer identification kinds offered on a new customer
pub const BUYER_ID_TYPES: [IdentifierType; 11] = [
    IdentifierType {
        type_name: "Tax Identification Number",
        type_code: "TIN",
    },
    IdentifierType {
        type_name: "Commercial Registration Number",
        type_code: "CRN",
    },
    IdentifierType {
        type_name: "MOMRAH License",
        type_code: "MOM",
    },
    IdentifierType {
        type_name: "MHRSD License",
        type_code: "MLS",
    },
    IdentifierType {
        type_name: "700 Number",
        type_code: "700",
    },
    IdentifierType {
        type_name: "MISA License",
        type_code: "SAG",
    },
    IdentifierType {
        type_name: "National ID",
        type_code: "NAT",
    },
    IdentifierType {
        type_name: "GCC ID",
        type_code: "GCC",
    },
    IdentifierType {
        type_name: "Iqama",
        type_code: "IQA",
    },
    IdentifierType {
        type_name: "Passport ID",
        type_code: "PAS",
    },
    IdentifierType {
        type_name: "Other OD",
        type_code: "OTH",
    },
];

/// Buyer party of simplified and standard invoices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    pub base: BaseAggregate<CustomerId>,

    pub customer_name: String,
    pub vat_registration_number: String,
    pub additional_ids: Vec<AdditionalId>,
}

impl Customer {
    pub fn new_for_insert(dto: &CustomerDto) -> Self {
        let code = dto.code.clone().unwrap_or_default();
        let mut customer = Self {
            base: BaseAggregate::new(CustomerId::new_v4(), code, dto.customer_name.clone()),
            customer_name: String::new(),
            vat_registration_number: String::new(),
            additional_ids: Vec::new(),
        };
        customer.update(dto);
        customer
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.0.to_string()
    }

    pub fn update(&mut self, dto: &CustomerDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.customer_name.clone();
        self.base.comment = dto.comment.clone();
        self.customer_name = dto.customer_name.clone();
        self.vat_registration_number = dto.vat_registration_number.clone();
        self.additional_ids = dto.additional_ids.clone();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(ValidationError::Required("Customer name".into()));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Customer {
    type Id = CustomerId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "customer"
    }

    fn element_name() -> &'static str {
        "Customer"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub customer_name: String,
    #[serde(default)]
    pub vat_registration_number: String,
    #[serde(default)]
    pub additional_ids: Vec<AdditionalId>,
    pub comment: Option<String>,
}

impl CustomerDto {
    /// Seeds the buyer id table; only a customer that was never saved gets rows
    pub fn seed_additional_ids(&mut self) -> bool {
        if self.id.is_some() {
            return false;
        }
        seed_if_empty(&mut self.additional_ids, &BUYER_ID_TYPES)
    }
}

impl From<&Customer> for CustomerDto {
    fn from(customer: &Customer) -> Self {
        Self {
            id: Some(customer.to_string_id()),
            code: Some(customer.base.code.clone()),
            customer_name: customer.customer_name.clone(),
            vat_registration_number: customer.vat_registration_number.clone(),
            additional_ids: customer.additional_ids.clone(),
            comment: customer.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_gets_buyer_ids_in_order() {
        let mut form = CustomerDto {
            customer_name: "Al Noor Stores".into(),
            ..Default::default()
        };
        assert!(form.seed_additional_ids());
        let codes: Vec<_> = form
            .additional_ids
            .iter()
            .map(|r| r.type_code.as_str())
            .collect();
        assert_eq!(
            codes,
            ["TIN", "CRN", "MOM", "MLS", "700", "SAG", "NAT", "GCC", "IQA", "PAS", "OTH"]
        );
        assert_eq!(form.additional_ids[0].type_name, "Tax Identification Number");
        assert!(!form.seed_additional_ids());
    }

    #[test]
    fn test_saved_customer_is_not_seeded() {
        let customer = Customer::new_for_insert(&CustomerDto {
            customer_name: "Al Noor Stores".into(),
            ..Default::default()
        });
        let mut form = CustomerDto::from(&customer);
        assert!(form.additional_ids.is_empty());
        assert!(!form.seed_additional_ids());
        assert!(form.additional_ids.is_empty());
    }

    #[test]
    fn test_validate_requires_name() {
        let customer = Customer::new_for_insert(&CustomerDto::default());
        assert_eq!(
            customer.validate(),
            Err(ValidationError::Required("Customer name".into()))
        );
    }

    #[test]
    fn test_full_name() {
        assert_eq!(Customer::full_name(), "a006_customer");
    }
}
