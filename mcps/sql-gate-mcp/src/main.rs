//! SQL Gate MCP Server
//!
//! Exposes a database through guarded read-only tools over stdio.

use sql_gate_mcp::SqlGateMcpServer;

mcp_common::serve_stdio!(SqlGateMcpServer, "sql_gate_mcp");
