mod navigation_flow;
mod registry_lifecycle;
