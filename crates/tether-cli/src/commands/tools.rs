use tether_tools::ToolRegistry;

pub fn run(tools: &ToolRegistry, name: Option<&str>) -> anyhow::Result<()> {
    match name {
        Some(name) => print_tool_detail(tools, name)?,
        None => print_tool_list(tools),
    }

    Ok(())
}

fn print_tool_list(tools: &ToolRegistry) {
    let names = tools.names();

    println!("Prebuilt tools ({}):", names.len());
    for name in names {
        let description = tools
            .get(&name)
            .map(|tool| tool.description().to_string())
            .unwrap_or_else(|| "unknown tool".to_string());
        println!("{name} - {description}");
    }
}

fn print_tool_detail(tools: &ToolRegistry, name: &str) -> anyhow::Result<()> {
    let tool = tools
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown tool: {name}"))?;
    let schema = serde_json::to_string_pretty(&tool.input_schema())?;

    println!("name: {}", tool.name());
    println!("description: {}", tool.description());
    println!("executed by: agent service");
    println!("input schema:");
    println!("{schema}");

    Ok(())
}
