//! Fixed instruction prompts sent alongside each uploaded image. The output
//! schemas described here are what the parsing side expects back.

pub const FLOOR_PLAN_PROMPT: &str = "Analyze this floor plan image in detail. \
Please identify all rooms, their dimensions (in feet), area (in square feet), \
and any notable features. If this appears to be a screenshot or not an actual \
floor plan, respond with a JSON object: {\"error\": \"The provided image does \
not appear to be a floor plan. Please upload an architectural floor plan \
image.\"}. Otherwise format the response as JSON with the following structure: \
{ rooms: [{ name: string, dimensions: string, area: number, features: \
string[] }], totalArea: number, notes: string }. Don't include any \
explanatory text, just the JSON.";

pub const CHATTEL_PROMPT: &str = "Please analyze this image and identify all \
chattels and furniture items. For each item, provide its name and estimate \
its replacement cost in GBP. Focus on significant items that would be \
considered in a property inventory. Format your response as a JSON array of \
objects, where each object has 'name', 'replacementCost' (in GBP), and \
'confidence' (0-1) properties.";
