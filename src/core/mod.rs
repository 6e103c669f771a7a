pub mod contract_editor;
pub mod contract_store;
pub mod currency;
pub mod dates;
pub mod user_form;
pub mod users_store;

pub use crate::domain::model::{Kontrak, Pendapatan, Potongan, User, UserContracts, UserPayload};
pub use crate::domain::ports::{ConfigProvider, ContractApi, UserApi};
pub use crate::utils::error::Result;
