use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all="camelCase")]
pub struct AdminLoginRequest<'a> {
    pub(crate) admin_id: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all="camelCase")]
pub struct MembershipRequest {
    pub(crate) membership_status: bool,
}
