use reqwest::Client;

/// Issue a JSON-RPC call naming a tool and print the result or error.
pub async fn run(server_url: &str, tool: &str, params: &str, id: i64) -> anyhow::Result<()> {
    let params: serde_json::Value = serde_json::from_str(params)
        .map_err(|err| anyhow::anyhow!("--params is not valid JSON: {err}"))?;

    let resp = Client::new()
        .post(format!("{server_url}/mcp"))
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": tool,
            "params": params,
        }))
        .send()
        .await?;

    if !resp.status().is_success() {
        let body = resp.text().await?;
        anyhow::bail!("Request failed: {body}");
    }

    let body: serde_json::Value = resp.json().await?;
    if let Some(result) = body.get("result") {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if let Some(error) = body.get("error") {
        eprintln!("Error: {}", serde_json::to_string_pretty(error)?);
    }

    Ok(())
}
