//! The RPC surface of the contract: one entry per remote call with its
//! HTTP verb, path template and body expectation. The gateway builds
//! its route table from [`Rpc::ALL`] at startup.

/// The three contract services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Pet,
    Store,
    User,
}

impl ServiceKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pet => "PetService",
            Self::Store => "StoreService",
            Self::User => "UserService",
        }
    }
}

/// Every RPC in the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rpc {
    GetPetById,
    UpdatePetWithForm,
    DeletePet,
    UploadFile,
    AddPet,
    UpdatePet,
    FindPetsByStatus,
    FindPetsByTags,
    PlaceOrder,
    GetOrderById,
    DeleteOrder,
    GetInventory,
    CreateUser,
    CreateUsersWithArrayInput,
    CreateUsersWithListInput,
    GetUserByName,
    UpdateUser,
    DeleteUser,
    LoginUser,
    LogoutUser,
}

impl Rpc {
    pub const ALL: [Rpc; 20] = [
        Rpc::GetPetById,
        Rpc::UpdatePetWithForm,
        Rpc::DeletePet,
        Rpc::UploadFile,
        Rpc::AddPet,
        Rpc::UpdatePet,
        Rpc::FindPetsByStatus,
        Rpc::FindPetsByTags,
        Rpc::PlaceOrder,
        Rpc::GetOrderById,
        Rpc::DeleteOrder,
        Rpc::GetInventory,
        Rpc::CreateUser,
        Rpc::CreateUsersWithArrayInput,
        Rpc::CreateUsersWithListInput,
        Rpc::GetUserByName,
        Rpc::UpdateUser,
        Rpc::DeleteUser,
        Rpc::LoginUser,
        Rpc::LogoutUser,
    ];

    pub const fn service(self) -> ServiceKind {
        match self {
            Self::GetPetById
            | Self::UpdatePetWithForm
            | Self::DeletePet
            | Self::UploadFile
            | Self::AddPet
            | Self::UpdatePet
            | Self::FindPetsByStatus
            | Self::FindPetsByTags => ServiceKind::Pet,
            Self::PlaceOrder | Self::GetOrderById | Self::DeleteOrder | Self::GetInventory => {
                ServiceKind::Store
            }
            Self::CreateUser
            | Self::CreateUsersWithArrayInput
            | Self::CreateUsersWithListInput
            | Self::GetUserByName
            | Self::UpdateUser
            | Self::DeleteUser
            | Self::LoginUser
            | Self::LogoutUser => ServiceKind::User,
        }
    }

    /// Fully qualified RPC name, used in logs and 501 messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetPetById => "PetService/GetPetById",
            Self::UpdatePetWithForm => "PetService/UpdatePetWithForm",
            Self::DeletePet => "PetService/DeletePet",
            Self::UploadFile => "PetService/UploadFile",
            Self::AddPet => "PetService/AddPet",
            Self::UpdatePet => "PetService/UpdatePet",
            Self::FindPetsByStatus => "PetService/FindPetsByStatus",
            Self::FindPetsByTags => "PetService/FindPetsByTags",
            Self::PlaceOrder => "StoreService/PlaceOrder",
            Self::GetOrderById => "StoreService/GetOrderById",
            Self::DeleteOrder => "StoreService/DeleteOrder",
            Self::GetInventory => "StoreService/GetInventory",
            Self::CreateUser => "UserService/CreateUser",
            Self::CreateUsersWithArrayInput => "UserService/CreateUsersWithArrayInput",
            Self::CreateUsersWithListInput => "UserService/CreateUsersWithListInput",
            Self::GetUserByName => "UserService/GetUserByName",
            Self::UpdateUser => "UserService/UpdateUser",
            Self::DeleteUser => "UserService/DeleteUser",
            Self::LoginUser => "UserService/LoginUser",
            Self::LogoutUser => "UserService/LogoutUser",
        }
    }

    pub const fn verb(self) -> &'static str {
        match self {
            Self::GetPetById
            | Self::FindPetsByStatus
            | Self::FindPetsByTags
            | Self::GetOrderById
            | Self::GetInventory
            | Self::GetUserByName
            | Self::LoginUser
            | Self::LogoutUser => "GET",
            Self::UpdatePetWithForm
            | Self::UploadFile
            | Self::AddPet
            | Self::PlaceOrder
            | Self::CreateUser
            | Self::CreateUsersWithArrayInput
            | Self::CreateUsersWithListInput => "POST",
            Self::UpdatePet | Self::UpdateUser => "PUT",
            Self::DeletePet | Self::DeleteOrder | Self::DeleteUser => "DELETE",
        }
    }

    pub const fn path_template(self) -> &'static str {
        match self {
            Self::GetPetById | Self::UpdatePetWithForm | Self::DeletePet => "/pet/{petId}",
            Self::UploadFile => "/pet/{petId}/uploadImage",
            Self::AddPet | Self::UpdatePet => "/pet",
            Self::FindPetsByStatus => "/pet/findByStatus",
            Self::FindPetsByTags => "/pet/findByTags",
            Self::PlaceOrder => "/store/order",
            Self::GetOrderById | Self::DeleteOrder => "/store/order/{orderId}",
            Self::GetInventory => "/store/inventory",
            Self::CreateUser => "/user",
            Self::CreateUsersWithArrayInput => "/user/createWithArray",
            Self::CreateUsersWithListInput => "/user/createWithList",
            Self::GetUserByName | Self::UpdateUser | Self::DeleteUser => "/user/{username}",
            Self::LoginUser => "/user/login",
            Self::LogoutUser => "/user/logout",
        }
    }

    /// Whether this RPC binds a JSON body. The two form-data routes
    /// carry only their path parameter in the contract (the source
    /// generator drops form fields), so they are not listed here.
    pub const fn expects_json_body(self) -> bool {
        matches!(
            self,
            Self::AddPet
                | Self::UpdatePet
                | Self::PlaceOrder
                | Self::CreateUser
                | Self::CreateUsersWithArrayInput
                | Self::CreateUsersWithListInput
                | Self::UpdateUser
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_verb_and_template_pairs_are_unique() {
        let mut seen = HashSet::new();
        for rpc in Rpc::ALL {
            assert!(
                seen.insert((rpc.verb(), rpc.path_template())),
                "duplicate binding for {}",
                rpc.name()
            );
        }
    }

    #[test]
    fn test_rpc_names_are_unique_and_qualified() {
        let mut seen = HashSet::new();
        for rpc in Rpc::ALL {
            assert!(seen.insert(rpc.name()));
            assert!(rpc.name().starts_with(rpc.service().name()));
        }
    }

    #[test]
    fn test_json_body_rpcs_are_mutations() {
        for rpc in Rpc::ALL {
            if rpc.expects_json_body() {
                assert_ne!(rpc.verb(), "GET", "{}", rpc.name());
            }
        }
    }
}
