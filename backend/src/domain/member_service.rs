//! Member enrollment service.
//!
//! Member codes ("MEM0001", ...) are derived from a count query executed
//! just before each enrollment. With a single writer this yields a strictly
//! increasing sequence; it is not collision-safe under concurrent writers
//! (a known limitation of the scheme, carried deliberately).

use chrono::Utc;
use log::info;
use shared::{CreateMemberRequest, MemberStatus};
use std::sync::Arc;

use crate::domain::models::Member;
use crate::domain::DomainError;
use crate::storage::{Connection, MemberStorage};

/// Service for enrolling, listing, and removing members.
#[derive(Clone)]
pub struct MemberService<C: Connection> {
    member_repository: C::MemberRepository,
}

impl<C: Connection> MemberService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let member_repository = connection.create_member_repository();
        Self { member_repository }
    }

    pub fn enroll_member(
        &self,
        request: CreateMemberRequest,
    ) -> Result<shared::Member, DomainError> {
        if request.name.trim().is_empty() {
            return Err(DomainError::Validation("member name is required".to_string()));
        }
        if request.email.trim().is_empty() {
            return Err(DomainError::Validation("member email is required".to_string()));
        }

        let current_count = self.member_repository.count_members()?;
        let member = Member {
            id: Member::generate_id(),
            member_id: Member::format_member_code(current_count),
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            join_date: Utc::now(),
            total_savings: 0.0,
            total_loans: 0.0,
            status: MemberStatus::Active,
        };

        self.member_repository.store_member(&member)?;
        info!("Enrolled member {} as {}", member.name, member.member_id);
        Ok(member.to_dto())
    }

    pub fn list_members(&self) -> Result<Vec<shared::Member>, DomainError> {
        let members = self.member_repository.list_members()?;
        Ok(members.iter().map(Member::to_dto).collect())
    }

    pub fn remove_member(&self, member_id: &str) -> Result<(), DomainError> {
        if !self.member_repository.delete_member(member_id)? {
            return Err(DomainError::NotFound { entity: "member", id: member_id.to_string() });
        }
        Ok(())
    }

    pub fn member_count(&self) -> Result<usize, DomainError> {
        Ok(self.member_repository.count_members()?)
    }
}
