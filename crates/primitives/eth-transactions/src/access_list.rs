use dp_rlp::{RlpError, RlpItem};
use primitive_types::{H160, H256};

/// Addresses and storage slots a transaction plans to touch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessList(pub Vec<AccessListItem>);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessListItem {
    pub address: H160,
    pub storage_keys: Vec<H256>,
}

impl AccessList {
    /// `[[address, [storageKey, ...]], ...]`
    pub fn to_rlp(&self) -> RlpItem {
        RlpItem::List(
            self.0
                .iter()
                .map(|item| {
                    RlpItem::List(vec![
                        RlpItem::address(&item.address),
                        RlpItem::List(item.storage_keys.iter().map(RlpItem::h256).collect()),
                    ])
                })
                .collect(),
        )
    }

    pub fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let items = item
            .as_list()?
            .iter()
            .map(|entry| -> Result<AccessListItem, RlpError> {
                match entry.as_list()? {
                [address, storage_keys] => Ok(AccessListItem {
                    address: address.as_address()?,
                    storage_keys: storage_keys.as_list()?.iter().map(RlpItem::as_h256).collect::<Result<_, _>>()?,
                }),
                    _ => Err(RlpError::UnexpectedItem { expected: "access list entry of two items" }),
                }
            })
            .collect::<Result<Vec<_>, RlpError>>()?;
        Ok(Self(items))
    }
}

impl From<Vec<AccessListItem>> for AccessList {
    fn from(items: Vec<AccessListItem>) -> Self {
        Self(items)
    }
}
