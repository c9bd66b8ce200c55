use std::sync::Arc;

use chrono::Utc;
use tonic::{Request, Response, Status};

use crate::middleware::{AuthContext, Check, Permission};
use crate::proto::dashboard::dashboard_service_server::DashboardService;
use crate::proto::dashboard::{MonthlyCount, StatsReq, StatsRes, StatusCount};
use crate::repository::{RequestRepository, TicketRepository};
use crate::usecases::dashboard::{count_by_month, count_by_status, window_months, Chartable};

pub struct DashboardServiceImpl {
    tickets: Arc<dyn TicketRepository>,
    requests: Arc<dyn RequestRepository>,
}

impl DashboardServiceImpl {
    pub fn new(tickets: Arc<dyn TicketRepository>, requests: Arc<dyn RequestRepository>) -> Self {
        Self { tickets, requests }
    }
}

fn stats<T: Chartable>(records: &[T], months: Option<i32>) -> StatsRes {
    let months = window_months(months);
    StatsRes {
        by_month: count_by_month(records, Utc::now(), months)
            .into_iter()
            .map(|m| MonthlyCount {
                month: m.month,
                count: m.count,
            })
            .collect(),
        by_status: count_by_status(records)
            .into_iter()
            .map(|s| StatusCount {
                status: s.status.to_string(),
                count: s.count,
            })
            .collect(),
        total: records.len() as i64,
    }
}

#[tonic::async_trait]
impl DashboardService for DashboardServiceImpl {
    async fn get_ticket_stats(
        &self,
        request: Request<StatsReq>,
    ) -> Result<Response<StatsRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(Check::Permission(Permission::ManageTickets))?;

        let tickets = self
            .tickets
            .get_all_tickets_in_organization(&ctx.org_id, None)
            .await?;

        Ok(Response::new(stats(&tickets, request.get_ref().months)))
    }

    async fn get_request_stats(
        &self,
        request: Request<StatsReq>,
    ) -> Result<Response<StatsRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(Check::Permission(Permission::ManageRequests))?;

        let requests = self
            .requests
            .get_all_requests_in_organization(&ctx.org_id, None)
            .await?;

        Ok(Response::new(stats(&requests, request.get_ref().months)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::context::test_support::*;
    use crate::models::{EquipmentRequest, RequestStatus, Ticket, TicketPriority, TicketStatus};
    use crate::repository::{MockRequestRepository, MockTicketRepository};
    use tonic::Code;
    use uuid::Uuid;

    fn ticket(status: TicketStatus) -> Ticket {
        Ticket {
            id: Uuid::new_v4(),
            title: "VPN drops".to_string(),
            description: "Disconnects every few minutes".to_string(),
            status,
            priority: TicketPriority::Low,
            owner_id: USER.to_string(),
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn equipment_request(status: RequestStatus) -> EquipmentRequest {
        EquipmentRequest {
            id: Uuid::new_v4(),
            owner_id: USER.to_string(),
            status,
            message: None,
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_ticket_stats() {
        let mut tickets = MockTicketRepository::new();
        tickets
            .expect_get_all_tickets_in_organization()
            .withf(|org, status| org.as_str() == ORG && status.is_none())
            .returning(|_, _| {
                Ok(vec![
                    ticket(TicketStatus::Open),
                    ticket(TicketStatus::Open),
                    ticket(TicketStatus::Closed),
                ])
            });
        let service = DashboardServiceImpl::new(
            Arc::new(tickets),
            Arc::new(MockRequestRepository::new()),
        );

        let res = service
            .get_ticket_stats(admin_request(StatsReq { months: Some(6) }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.total, 3);
        assert_eq!(res.by_month.len(), 6);
        assert_eq!(res.by_month.last().unwrap().count, 3);
        let by_status: Vec<_> = res
            .by_status
            .iter()
            .map(|s| (s.status.as_str(), s.count))
            .collect();
        assert_eq!(by_status, vec![("Open", 2), ("InProgress", 0), ("Closed", 1)]);
    }

    #[tokio::test]
    async fn test_request_stats_default_window() {
        let mut requests = MockRequestRepository::new();
        requests
            .expect_get_all_requests_in_organization()
            .returning(|_, _| Ok(vec![equipment_request(RequestStatus::Accepted)]));
        let service = DashboardServiceImpl::new(
            Arc::new(MockTicketRepository::new()),
            Arc::new(requests),
        );

        let res = service
            .get_request_stats(admin_request(StatsReq { months: None }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.by_month.len(), 12);
        assert_eq!(res.by_status.len(), 4);
    }

    #[tokio::test]
    async fn test_member_cannot_see_stats() {
        let mut tickets = MockTicketRepository::new();
        tickets.expect_get_all_tickets_in_organization().never();
        let service = DashboardServiceImpl::new(
            Arc::new(tickets),
            Arc::new(MockRequestRepository::new()),
        );

        let status = service
            .get_ticket_stats(member_request(StatsReq { months: None }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }
}
