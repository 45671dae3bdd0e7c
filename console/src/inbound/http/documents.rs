//! Invoice document proxy.
//!
//! Report rows link here instead of to the backend so the browser never
//! needs backend credentials.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, web};
use tracing::debug;

use crate::domain::Error;

use super::ApiResult;
use super::state::HttpState;

/// Stream the document at `path` under the backend's invoicing root.
///
/// Backend 404s surface as 404; other backend failures as 502.
#[get("/admin/documents/{path:.*}")]
pub async fn download_document(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let path = path.into_inner();
    let document = state
        .documents
        .fetch_document(&path)
        .await
        .map_err(Error::from)?;
    debug!(%path, bytes = document.bytes.len(), "document proxied");

    Ok(HttpResponse::Ok()
        .content_type(document.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename(document.file_name)],
        })
        .body(document.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{BackendError, InvoiceDocument, MockInvoiceDocuments};
    use crate::inbound::http::state::HttpStatePorts;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use rstest::rstest;
    use std::sync::Arc;

    fn app_state(documents: MockInvoiceDocuments) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            documents: Arc::new(documents),
            ..HttpStatePorts::default()
        }))
    }

    #[actix_web::test]
    async fn streams_document_with_its_content_type() {
        let mut documents = MockInvoiceDocuments::new();
        documents
            .expect_fetch_document()
            .withf(|path: &str| path == "invoices/download/INV 5.pdf")
            .times(1)
            .return_once(|_| {
                Ok(InvoiceDocument {
                    content_type: "application/pdf".to_owned(),
                    file_name: "INV 5.pdf".to_owned(),
                    bytes: b"%PDF-1.7".to_vec(),
                })
            });
        let app = test::init_service(
            App::new()
                .app_data(app_state(documents))
                .service(download_document),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/admin/documents/invoices/download/INV%205.pdf")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/pdf")
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(disposition.starts_with("inline"));
        let body = test::read_body(response).await;
        assert_eq!(body.as_ref(), b"%PDF-1.7");
    }

    #[rstest]
    #[case(BackendError::rejected(404_u16, "Not Found"), StatusCode::NOT_FOUND)]
    #[case(BackendError::rejected(500_u16, "boom"), StatusCode::BAD_GATEWAY)]
    #[case(BackendError::invalid_request("invalid document path: .."), StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn backend_failures_map_to_statuses(
        #[case] failure: BackendError,
        #[case] expected: StatusCode,
    ) {
        let mut documents = MockInvoiceDocuments::new();
        documents
            .expect_fetch_document()
            .times(1)
            .return_once(move |_| Err(failure));
        let app = test::init_service(
            App::new()
                .app_data(app_state(documents))
                .service(download_document),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/admin/documents/invoices/INV-1.pdf")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), expected);
    }
}
