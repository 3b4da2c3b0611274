use serde::Deserialize;

use rollcall_core::MemberId;
use rollcall_directory::MemberRole;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub full_name: String,
    pub card_number: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<MemberRole>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<MemberId>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    /// Auth roles granted at registration ("admin", "leader", "member").
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchLogsParams {
    #[serde(rename = "memberName")]
    pub member_name: String,
}
