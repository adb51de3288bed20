#[cfg(not(feature = "mock"))]
use gloo_net::http::{Request, Response};
use js_sys::Date;
use serde::Serialize;
#[cfg(not(feature = "mock"))]
use task_admin_shared::{QueueListResponse, TaskEnvelope, ToolListResponse};
use task_admin_shared::{
    ActionResponse, CompleteTaskRequest, FailTaskRequest, Queue, Task, TaskAction,
    TaskListResponse, TaskListView, ToolNames,
};

#[cfg(not(feature = "mock"))]
use crate::config::API_BASE;
#[cfg(feature = "mock")]
use crate::models;

/// Empty JSON object sent by actions that take no input.
#[derive(Debug, Serialize)]
struct EmptyBody {}

/// 获取所有队列（包括已归档的）
pub async fn fetch_queues() -> Result<Vec<Queue>, String> {
    #[cfg(feature = "mock")]
    {
        return Ok(models::mock_queues());
    }

    #[cfg(not(feature = "mock"))]
    {
        let url = format!("{}/queues?_ts={}", API_BASE, Date::now() as u64);
        let response = Request::get(&url)
            .header("Cache-Control", "no-cache, no-store, max-age=0")
            .send()
            .await
            .map_err(|e| format!("Network error: {:?}", e))?;

        if !response.ok() {
            return Err(http_error(response).await);
        }

        let json_response: QueueListResponse = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {:?}", e))?;

        Ok(json_response.queues)
    }
}

/// 按当前筛选条件和分页获取任务列表
pub async fn fetch_tasks(view: &TaskListView) -> Result<TaskListResponse, String> {
    #[cfg(feature = "mock")]
    {
        return Ok(models::mock_task_page(view));
    }

    #[cfg(not(feature = "mock"))]
    {
        let params = view
            .query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect::<Vec<_>>();
        let url = format!("{}/tasks?{}&_ts={}", API_BASE, params.join("&"), Date::now() as u64);

        let response = Request::get(&url)
            .header("Cache-Control", "no-cache, no-store, max-age=0")
            .header("Pragma", "no-cache")
            .send()
            .await
            .map_err(|e| format!("Network error: {:?}", e))?;

        if !response.ok() {
            return Err(http_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| format!("Parse error: {:?}", e))
    }
}

/// 获取单个任务详情
pub async fn fetch_task(task_id: &str) -> Result<Task, String> {
    if task_id.trim().is_empty() {
        return Err("task_id is empty".to_string());
    }

    #[cfg(feature = "mock")]
    {
        return models::mock_task(task_id).ok_or_else(|| "Task not found".to_string());
    }

    #[cfg(not(feature = "mock"))]
    {
        let url = format!(
            "{}/tasks/{}?_ts={}",
            API_BASE,
            urlencoding::encode(task_id),
            Date::now() as u64
        );
        let response = Request::get(&url)
            .header("Cache-Control", "no-cache, no-store, max-age=0")
            .send()
            .await
            .map_err(|e| format!("Network error: {:?}", e))?;

        if response.status() == 404 {
            return Err("Task not found".to_string());
        }
        if !response.ok() {
            return Err(http_error(response).await);
        }

        let envelope: TaskEnvelope = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {:?}", e))?;
        Ok(envelope.task)
    }
}

/// Load the friendly tool names. Called before every list render.
pub async fn fetch_tool_names() -> Result<ToolNames, String> {
    #[cfg(feature = "mock")]
    {
        return Ok(ToolNames::from_tools(models::mock_tools()));
    }

    #[cfg(not(feature = "mock"))]
    {
        let url = format!("{}/tools", API_BASE);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {:?}", e))?;
        if !response.ok() {
            return Err(http_error(response).await);
        }

        let json_response: ToolListResponse = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {:?}", e))?;
        Ok(ToolNames::from_tools(json_response.tools))
    }
}

pub async fn claim_task(task_id: &str) -> Result<ActionResponse, String> {
    post_task_action(task_id, TaskAction::Claim, &EmptyBody {}).await
}

pub async fn complete_task(
    task_id: &str,
    request: &CompleteTaskRequest,
) -> Result<ActionResponse, String> {
    post_task_action(task_id, TaskAction::Complete, request).await
}

pub async fn fail_task(task_id: &str, request: &FailTaskRequest) -> Result<ActionResponse, String> {
    post_task_action(task_id, TaskAction::Fail, request).await
}

pub async fn retry_task(task_id: &str) -> Result<ActionResponse, String> {
    post_task_action(task_id, TaskAction::Retry, &EmptyBody {}).await
}

pub async fn requeue_task(task_id: &str) -> Result<ActionResponse, String> {
    post_task_action(task_id, TaskAction::Requeue, &EmptyBody {}).await
}

async fn post_task_action<B: Serialize>(
    task_id: &str,
    action: TaskAction,
    request: &B,
) -> Result<ActionResponse, String> {
    #[cfg(feature = "mock")]
    {
        let _ = request;
        return Ok(models::mock_action(task_id, action, Date::now() as u64));
    }

    #[cfg(not(feature = "mock"))]
    {
        let url = format!(
            "{}/tasks/{}/{}",
            API_BASE,
            urlencoding::encode(task_id),
            action.path_segment()
        );
        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .map_err(|e| format!("Serialize error: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {:?}", e))?;
        if !response.ok() {
            return Err(http_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("Parse error: {:?}", e))?;
        ActionResponse::from_body(&body).map_err(|e| e.to_string())
    }
}

/// `HTTP error: <status>`, plus the server's `error` field when it sent one.
#[cfg(not(feature = "mock"))]
async fn http_error(response: Response) -> String {
    let status = response.status();
    let detail = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .filter(|detail| !detail.trim().is_empty());
    match detail {
        Some(detail) => format!("HTTP error: {} ({})", status, detail),
        None => format!("HTTP error: {}", status),
    }
}
