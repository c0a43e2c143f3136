pub mod analytics;
pub mod department;
pub mod employee;
pub mod generate;
pub mod project;
pub mod salary;

use actix_web::HttpResponse;
use serde_json::json;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Welcome to the Employee Management API",
        "endpoints": {
            "departments": "/departments",
            "employees": "/employees",
            "employee_details": "/employees/{id}",
            "projects": "/projects",
            "salaries": "/salaries",
            "generate_mock_data": "/generate/mock_data",
            "analytics_summary": "/analytics/summary",
        }
    }))
}
