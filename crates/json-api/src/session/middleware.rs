//! Session middleware.

use enrol_app::domain::purchases::models::UserId;
use salvo::prelude::*;
use tracing::debug;

use crate::{extensions::*, session::USER_ID_HEADER};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match extract_user_id(req) {
        Some(user) => depot.insert_user_id(user),
        None => debug!("anonymous request"),
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_user_id(req: &Request) -> Option<UserId> {
    let value = req.headers().get(USER_ID_HEADER)?.to_str().ok()?;

    UserId::new(value).ok()
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot
            .user_id()
            .map_or_else(|| "anonymous".to_string(), ToString::to_string);

        res.render(user);
    }

    fn make_service() -> Service {
        Service::new(Router::new().hoop(handler).push(Router::with_path("whoami").get(echo_user)))
    }

    #[tokio::test]
    async fn test_user_header_is_injected() -> TestResult {
        let mut res = TestClient::get("http://example.com/whoami")
            .add_header(USER_ID_HEADER, "u1", true)
            .send(&make_service())
            .await;

        assert_eq!(res.take_string().await?, "u1");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_header_is_anonymous() -> TestResult {
        let mut res = TestClient::get("http://example.com/whoami")
            .send(&make_service())
            .await;

        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_header_is_anonymous() -> TestResult {
        let mut res = TestClient::get("http://example.com/whoami")
            .add_header(USER_ID_HEADER, "   ", true)
            .send(&make_service())
            .await;

        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }
}
