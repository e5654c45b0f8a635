//! Prompt templates. Each analysis prompt depends only on the fund name; the
//! synthesis prompt embeds the three analyses verbatim.

/// Section headings the synthesis prompt asks for, in order.
pub const REPORT_SECTIONS: [&str; 6] = [
    "Executive Summary",
    "Fund Overview",
    "Performance Analysis",
    "Current Market Environment",
    "Investment Thesis",
    "Final Recommendation",
];

pub fn fund_analysis(fund_name: &str) -> String {
    format!(
        "As an expert Mutual Fund Analyst specializing in Indian mutual funds, provide a comprehensive analysis of {fund_name}.\n\n\
        Please analyze:\n\
        1. Fund Overview (AUM, expense ratio, fund manager, investment style)\n\
        2. Historical Performance (1Y, 3Y, 5Y returns vs benchmark and category)\n\
        3. Portfolio Analysis (top holdings, sector allocation, market cap distribution)\n\
        4. Risk Metrics (beta, standard deviation, Sharpe ratio)\n\
        5. Fund Manager track record\n\
        6. Strengths and weaknesses\n\
        7. Suitability for different investor profiles\n\n\
        Provide specific data points and numbers wherever possible. Focus on recent data from the last 12 months."
    )
}

pub fn sentiment_analysis(fund_name: &str) -> String {
    format!(
        "As a Financial Sentiment Analysis expert, analyze the current market sentiment around {fund_name}.\n\n\
        Research and analyze:\n\
        1. Recent news articles and press releases (last 4 weeks)\n\
        2. Expert commentary and analyst recommendations\n\
        3. Social media sentiment from financial platforms\n\
        4. Any significant events affecting the fund or its holdings\n\
        5. Investor sentiment trends\n\
        6. Media coverage tone (positive/neutral/negative)\n\n\
        Provide:\n\
        - Overall sentiment score and direction\n\
        - Key positive and negative catalysts\n\
        - Recent events impact\n\
        - Forward-looking sentiment indicators\n\n\
        Focus on credible financial news sources and expert opinions."
    )
}

pub fn macro_analysis(fund_name: &str) -> String {
    format!(
        "As a Macroeconomic Analysis expert, analyze how current macroeconomic conditions impact {fund_name}.\n\n\
        Analyze current economic indicators:\n\
        1. India's GDP growth trends and forecasts\n\
        2. RBI monetary policy and interest rate outlook\n\
        3. Inflation trends (CPI, WPI) and impact\n\
        4. Global economic factors affecting Indian markets\n\
        5. Currency trends (INR/USD) and FII flows\n\
        6. Government policies affecting mutual funds/capital markets\n\
        7. Sectoral economic trends relevant to the fund's holdings\n\n\
        Provide:\n\
        - Current economic environment summary\n\
        - Key macroeconomic risks and opportunities\n\
        - Specific implications for the fund's performance\n\
        - Forward-looking economic scenarios\n\
        - Policy changes that could impact the fund\n\n\
        Focus on recent data and RBI/government announcements."
    )
}

pub fn synthesis(
    fund_name: &str,
    fund_analysis: &str,
    sentiment_analysis: &str,
    macro_analysis: &str,
) -> String {
    let [summary, overview, performance, environment, thesis, recommendation] = REPORT_SECTIONS;

    format!(
        "As an expert Research Report Writer, compile a comprehensive investment research report for {fund_name} using the following analyses:\n\n\
        FUND ANALYSIS:\n{fund_analysis}\n\n\
        SENTIMENT ANALYSIS:\n{sentiment_analysis}\n\n\
        MACROECONOMIC ANALYSIS:\n{macro_analysis}\n\n\
        Create a professional research report with the following structure:\n\n\
        # Investment Research Report: {fund_name}\n\n\
        ## {summary}\n\
        - Key findings and investment recommendation\n\
        - Target investor profile\n\
        - Risk rating\n\n\
        ## {overview}\n\
        - Basic fund details and strategy\n\n\
        ## {performance}\n\
        - Historical performance summary\n\
        - Risk-adjusted returns\n\n\
        ## {environment}\n\
        - Macroeconomic backdrop\n\
        - Market sentiment\n\n\
        ## {thesis}\n\
        - Strengths and opportunities\n\
        - Risks and challenges\n\n\
        ## {recommendation}\n\
        - Investment rating (BUY/HOLD/SELL)\n\
        - Rationale for recommendation\n\
        - Suitable investor profile\n\
        - Investment horizon\n\n\
        Use professional investment research language and provide specific, actionable insights."
    )
}
